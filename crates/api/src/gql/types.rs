use async_graphql::connection::{Edge, EmptyFields};
use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, InputObject, Object, Result, SimpleObject, ID};
use infra::models::{BusinessRow, PersonRow, PostRow};
use uuid::Uuid;

use super::complexity;
use super::connection::{paginate, OffsetCursor, PageConnection};
use super::global_id::to_global_id;
use super::loaders::PersonLoader;
use super::node::NodeKind;
use super::scalars::Time;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct Person {
    row: PersonRow,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self { row }
    }
}

impl Person {
    pub fn uuid(&self) -> Uuid {
        self.row.id
    }
}

#[Object]
impl Person {
    /// The ID of an object
    pub async fn id(&self) -> ID {
        to_global_id(NodeKind::Person.as_str(), self.row.id)
    }

    async fn name(&self) -> &str {
        &self.row.name
    }

    async fn age(&self) -> Option<i32> {
        self.row.age
    }

    async fn created_at(&self) -> Time {
        self.row.created_at.into()
    }

    async fn updated_at(&self) -> Time {
        self.row.updated_at.into()
    }

    /// Posts written by this person, oldest first.
    #[graphql(complexity = "complexity::connection(first, last, child_complexity)")]
    async fn posts(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Result<PageConnection<Post>> {
        let repo = ctx.data::<AppState>()?.posts();
        let author_id = self.row.id;
        let total = repo.count_by_author(author_id);

        paginate(after, before, first, last, total, |page| {
            repo.list_by_author(author_id, page)
                .into_iter()
                .map(Post::from)
                .collect()
        })
        .await
    }
}

#[derive(Debug, Clone)]
pub struct Business {
    row: BusinessRow,
}

impl From<BusinessRow> for Business {
    fn from(row: BusinessRow) -> Self {
        Self { row }
    }
}

#[Object]
impl Business {
    /// The ID of an object
    pub async fn id(&self) -> ID {
        to_global_id(NodeKind::Business.as_str(), self.row.id)
    }

    async fn name(&self) -> &str {
        &self.row.name
    }

    async fn employee_count(&self) -> i32 {
        self.row.employee_count
    }

    async fn created_at(&self) -> Time {
        self.row.created_at.into()
    }
}

#[derive(Debug, Clone)]
pub struct Post {
    row: PostRow,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self { row }
    }
}

impl Post {
    pub fn uuid(&self) -> Uuid {
        self.row.id
    }

    pub fn author_uuid(&self) -> Uuid {
        self.row.author_id
    }
}

#[Object]
impl Post {
    /// The ID of an object
    pub async fn id(&self) -> ID {
        to_global_id(NodeKind::Post.as_str(), self.row.id)
    }

    async fn title(&self) -> &str {
        &self.row.title
    }

    async fn body(&self) -> &str {
        &self.row.body
    }

    async fn published_at(&self) -> Option<Time> {
        self.row.published_at.map(Time)
    }

    async fn is_published(&self) -> bool {
        self.row.is_published_at(chrono::Utc::now())
    }

    async fn created_at(&self) -> Time {
        self.row.created_at.into()
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Person>> {
        let loader = ctx.data::<DataLoader<PersonLoader>>()?;
        Ok(loader
            .load_one(self.row.author_id)
            .await?
            .map(Person::from))
    }
}

// ---------------------------------------------------------------------------
// Relay mutation inputs and payloads. Every input carries an optional
// `clientMutationId` which the payload returns unchanged.
// ---------------------------------------------------------------------------

#[derive(InputObject)]
pub struct IntroducePersonInput {
    pub client_mutation_id: Option<String>,
    pub name: String,
    pub age: Option<i32>,
}

#[derive(SimpleObject)]
pub struct IntroducePersonPayload {
    pub person: Person,
    pub client_mutation_id: Option<String>,
}

#[derive(InputObject)]
pub struct RenamePersonInput {
    pub client_mutation_id: Option<String>,
    pub person_id: ID,
    pub name: String,
}

#[derive(SimpleObject)]
pub struct RenamePersonPayload {
    pub person: Person,
    pub client_mutation_id: Option<String>,
}

#[derive(InputObject)]
pub struct IntroduceBusinessInput {
    pub client_mutation_id: Option<String>,
    pub name: String,
    #[graphql(default)]
    pub employee_count: i32,
}

#[derive(SimpleObject)]
pub struct IntroduceBusinessPayload {
    pub business: Business,
    pub client_mutation_id: Option<String>,
}

#[derive(InputObject)]
pub struct CreatePostInput {
    pub client_mutation_id: Option<String>,
    /// Global ID of the authoring `Person`.
    pub author_id: ID,
    pub title: String,
    #[graphql(default)]
    pub body: String,
    /// Leave empty to create a draft.
    pub published_at: Option<Time>,
}

#[derive(SimpleObject)]
pub struct CreatePostPayload {
    pub post: Post,
    /// Edge for appending the new post to a cached `posts` connection.
    pub post_edge: Edge<OffsetCursor, Post, EmptyFields>,
    pub client_mutation_id: Option<String>,
}

#[derive(InputObject)]
pub struct PublishPostInput {
    pub client_mutation_id: Option<String>,
    pub post_id: ID,
    /// Defaults to now.
    pub published_at: Option<Time>,
}

#[derive(SimpleObject)]
pub struct PublishPostPayload {
    pub post: Post,
    pub client_mutation_id: Option<String>,
}

#[derive(InputObject)]
pub struct DeletePostInput {
    pub client_mutation_id: Option<String>,
    pub post_id: ID,
}

#[derive(SimpleObject)]
pub struct DeletePostPayload {
    pub deleted_post_id: ID,
    pub client_mutation_id: Option<String>,
}
