use async_graphql::connection::Edge;
use async_graphql::{Context, Object, Result};
use chrono::Utc;
use infra::repos::{CreateBusiness, CreatePerson, CreatePost, UpdatePerson};

use super::connection::OffsetCursor;
use super::error::GqlError;
use super::global_id::{to_global_id, uuid_from_global_id};
use super::node::NodeKind;
use super::types::{
    CreatePostInput, CreatePostPayload, DeletePostInput, DeletePostPayload,
    IntroduceBusinessInput, IntroduceBusinessPayload, IntroducePersonInput,
    IntroducePersonPayload, Person, Post, PublishPostInput, PublishPostPayload,
    RenamePersonInput, RenamePersonPayload,
};
use crate::state::AppState;

/// Relay-style mutations: one `input` argument in, one payload out, with
/// `clientMutationId` passed through untouched.
#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn introduce_person(
        &self,
        ctx: &Context<'_>,
        input: IntroducePersonInput,
    ) -> Result<IntroducePersonPayload> {
        let state = ctx.data::<AppState>()?;
        let row = state
            .people()
            .create(CreatePerson {
                name: input.name,
                age: input.age,
            })
            .map_err(GqlError::from)?;

        tracing::info!(person_id = %row.id, "person introduced");
        Ok(IntroducePersonPayload {
            person: row.into(),
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn rename_person(
        &self,
        ctx: &Context<'_>,
        input: RenamePersonInput,
    ) -> Result<RenamePersonPayload> {
        let state = ctx.data::<AppState>()?;
        let person_id = uuid_from_global_id(&input.person_id, NodeKind::Person.as_str())
            .map_err(GqlError::from)?;

        let row = state
            .people()
            .update(
                person_id,
                UpdatePerson {
                    name: Some(input.name),
                    age: None,
                },
            )
            .map_err(GqlError::from)?;

        tracing::info!(person_id = %row.id, "person renamed");
        Ok(RenamePersonPayload {
            person: Person::from(row),
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn introduce_business(
        &self,
        ctx: &Context<'_>,
        input: IntroduceBusinessInput,
    ) -> Result<IntroduceBusinessPayload> {
        let state = ctx.data::<AppState>()?;
        let row = state
            .businesses()
            .create(CreateBusiness {
                name: input.name,
                employee_count: input.employee_count,
            })
            .map_err(GqlError::from)?;

        tracing::info!(business_id = %row.id, "business introduced");
        Ok(IntroduceBusinessPayload {
            business: row.into(),
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn create_post(
        &self,
        ctx: &Context<'_>,
        input: CreatePostInput,
    ) -> Result<CreatePostPayload> {
        let state = ctx.data::<AppState>()?;
        let author_id = uuid_from_global_id(&input.author_id, NodeKind::Person.as_str())
            .map_err(GqlError::from)?;

        let posts = state.posts();
        let row = posts
            .create(CreatePost {
                author_id,
                title: input.title,
                body: input.body,
                published_at: input.published_at.map(|t| t.into_inner()),
            })
            .map_err(GqlError::from)?;

        let Some(offset) = posts.position(row.id) else {
            tracing::error!(post_id = %row.id, "created post missing from store");
            return Err(GqlError::new("Post disappeared while being created").into());
        };
        let post = Post::from(row);
        state.events.publish_post_created(post.clone());

        tracing::info!(post_id = %post.uuid(), "post created");
        Ok(CreatePostPayload {
            post_edge: Edge::new(OffsetCursor(offset), post.clone()),
            post,
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn publish_post(
        &self,
        ctx: &Context<'_>,
        input: PublishPostInput,
    ) -> Result<PublishPostPayload> {
        let state = ctx.data::<AppState>()?;
        let post_id = uuid_from_global_id(&input.post_id, NodeKind::Post.as_str())
            .map_err(GqlError::from)?;
        let at = input
            .published_at
            .map(|t| t.into_inner())
            .unwrap_or_else(Utc::now);

        let post = Post::from(state.posts().publish(post_id, at).map_err(GqlError::from)?);
        state.events.publish_post_published(post.clone());

        tracing::info!(post_id = %post.uuid(), published_at = %at, "post published");

        Ok(PublishPostPayload {
            post,
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn delete_post(
        &self,
        ctx: &Context<'_>,
        input: DeletePostInput,
    ) -> Result<DeletePostPayload> {
        let state = ctx.data::<AppState>()?;
        let post_id = uuid_from_global_id(&input.post_id, NodeKind::Post.as_str())
            .map_err(GqlError::from)?;

        let removed = state.posts().delete(post_id).map_err(GqlError::from)?;

        tracing::info!(post_id = %removed.id, "post deleted");
        Ok(DeletePostPayload {
            deleted_post_id: to_global_id(NodeKind::Post.as_str(), removed.id),
            client_mutation_id: input.client_mutation_id,
        })
    }
}
