use async_graphql::{Context, MergedObject, Object, Result, ID};
use infra::pagination::LimitOffset;

use super::complexity;
use super::connection::{paginate, PageConnection};
use super::error::GqlError;
use super::global_id::uuid_from_global_id;
use super::node::{NodeKind, NodeQuery};
use super::scalars::Time;
use super::types::{Business, Person, Post};
use crate::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(NodeQuery, ContentQuery);

#[derive(Default)]
pub struct ContentQuery;

#[Object]
impl ContentQuery {
    /// Current server time.
    async fn server_time(&self) -> Time {
        Time::now()
    }

    /// People in the order they were introduced.
    ///
    /// Costs `limit` times the selection, so large limits are rejected when
    /// complexity analysis is on.
    #[graphql(complexity = "complexity::list(limit, child_complexity)")]
    async fn people(&self, ctx: &Context<'_>, limit: Option<i32>) -> Result<Vec<Person>> {
        if let Some(n) = limit.filter(|n| *n < 0) {
            return Err(GqlError::new(format!("\"limit\" must not be negative, got {n}")).into());
        }
        let state = ctx.data::<AppState>()?;
        let page = LimitOffset::new(complexity::page_size(limit), 0);
        Ok(state
            .people()
            .list(page)
            .into_iter()
            .map(Person::from)
            .collect())
    }

    async fn person(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Person>> {
        let state = ctx.data::<AppState>()?;
        let uuid = uuid_from_global_id(&id, NodeKind::Person.as_str()).map_err(GqlError::from)?;
        Ok(state.people().get(uuid).map(Person::from))
    }

    async fn business(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Business>> {
        let state = ctx.data::<AppState>()?;
        let uuid =
            uuid_from_global_id(&id, NodeKind::Business.as_str()).map_err(GqlError::from)?;
        Ok(state.businesses().get(uuid).map(Business::from))
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Post>> {
        let state = ctx.data::<AppState>()?;
        let uuid = uuid_from_global_id(&id, NodeKind::Post.as_str()).map_err(GqlError::from)?;
        Ok(state.posts().get(uuid).map(Post::from))
    }

    /// All posts, oldest first.
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
        let total = repo.count();

        paginate(after, before, first, last, total, |page| {
            repo.list(page).into_iter().map(Post::from).collect()
        })
        .await
    }

    #[graphql(complexity = "complexity::connection(first, last, child_complexity)")]
    async fn businesses(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Result<PageConnection<Business>> {
        let repo = ctx.data::<AppState>()?.businesses();
        let total = repo.count();

        paginate(after, before, first, last, total, |page| {
            repo.list(page).into_iter().map(Business::from).collect()
        })
        .await
    }
}
