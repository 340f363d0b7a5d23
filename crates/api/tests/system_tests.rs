mod common;

use api::config::GqlConfig;
use common::*;

#[tokio::test]
async fn test_server_time_uses_time_scalar() {
    let state = setup_state();
    let schema = schema_for(&state);

    let response = execute_graphql(&schema, "{ serverTime }", None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let raw = data["serverTime"].as_str().unwrap();
    assert!(raw.ends_with('Z'), "{raw} should be UTC");
    assert!(api::gql::scalars::Time::parse_str(raw).is_ok());
}

#[tokio::test]
async fn test_invalid_query() {
    let state = setup_state();
    let schema = schema_for(&state);

    let response = execute_graphql(&schema, "query { nonExistentField }", None).await;

    assert!(
        !response.errors.is_empty(),
        "Invalid query should return errors"
    );
    assert!(
        response.errors[0].message.contains("nonExistentField"),
        "Error message should name the unknown field, got: '{}'",
        response.errors[0].message
    );
}

#[tokio::test]
async fn test_malformed_query() {
    let state = setup_state();
    let schema = schema_for(&state);

    let query = r#"
        query {
            people {
                id
                # missing closing brace
    "#;

    let response = execute_graphql(&schema, query, None).await;

    assert!(
        !response.errors.is_empty(),
        "Malformed query should return errors"
    );
}

#[tokio::test]
async fn test_introspection_follows_config() {
    let state = setup_state();
    let query = "{ __schema { queryType { name } } }";

    let closed = execute_graphql(&schema_for(&state), query, None).await;
    let rejected = !closed.errors.is_empty();
    let closed_data = closed.data.into_json().unwrap();
    assert!(
        rejected || closed_data["__schema"].is_null(),
        "schema should not be visible: {closed_data}"
    );

    let open = execute_graphql(
        &schema_with(
            &state,
            GqlConfig {
                introspection: true,
                ..GqlConfig::default()
            },
        ),
        query,
        None,
    )
    .await;
    assert!(open.errors.is_empty(), "{:?}", open.errors);
    let data = open.data.into_json().unwrap();
    assert_eq!(data["__schema"]["queryType"]["name"], "QueryRoot");
}
