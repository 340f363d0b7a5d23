use api::config::GqlConfig;
use api::gql::global_id::to_global_id;
use api::gql::{build_schema, AppSchema};
use api::AppState;
use async_graphql::{Request, Variables};
use infra::db::Db;
use infra::repos::{CreateBusiness, CreatePerson, CreatePost};
use uuid::Uuid;

/// Fresh, empty store for one test.
pub fn setup_state() -> AppState {
    AppState::new(Db::new())
}

pub fn schema_for(state: &AppState) -> AppSchema {
    build_schema(state.clone(), &GqlConfig::default())
}

#[allow(dead_code)]
pub fn schema_with(state: &AppState, config: GqlConfig) -> AppSchema {
    build_schema(state.clone(), &config)
}

/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    schema: &AppSchema,
    query: &str,
    variables: Option<Variables>,
) -> async_graphql::Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    schema.execute(request).await
}

/// Create test person and return its row id and global ID
#[allow(dead_code)]
pub fn create_test_person(state: &AppState, name: &str) -> (Uuid, String) {
    let row = state
        .people()
        .create(CreatePerson {
            name: name.to_string(),
            age: None,
        })
        .expect("Failed to create test person");

    (row.id, to_global_id("Person", row.id).0)
}

/// Create test business and return its global ID
#[allow(dead_code)]
pub fn create_test_business(state: &AppState, name: &str) -> String {
    let row = state
        .businesses()
        .create(CreateBusiness {
            name: name.to_string(),
            employee_count: 5,
        })
        .expect("Failed to create test business");

    to_global_id("Business", row.id).0
}

/// Create test post and return its global ID
#[allow(dead_code)]
pub fn create_test_post(state: &AppState, author_id: Uuid, title: &str) -> String {
    let row = state
        .posts()
        .create(CreatePost {
            author_id,
            title: title.to_string(),
            body: format!("Body of {title}"),
            published_at: None,
        })
        .expect("Failed to create test post");

    to_global_id("Post", row.id).0
}
