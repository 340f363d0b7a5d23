mod common;

use api::config::GqlConfig;
use common::*;

fn assert_too_complex(response: &async_graphql::Response) {
    assert!(
        !response.errors.is_empty(),
        "query should have been rejected for complexity"
    );
    assert!(
        response.errors[0].message.contains("too complex"),
        "unexpected message: {}",
        response.errors[0].message
    );
}

#[tokio::test]
async fn test_query_under_limit_runs() {
    let state = setup_state();
    let schema = schema_for(&state);
    create_test_person(&state, "Ada");

    // 50 * (id + name) = 100 <= 200
    let response = execute_graphql(&schema, "{ people(limit: 50) { id name } }", None).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["people"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_limit_argument_scales_cost() {
    let state = setup_state();
    let schema = schema_for(&state);

    // 100 * (id + name + age) = 300 > 200
    let response =
        execute_graphql(&schema, "{ people(limit: 100) { id name age } }", None).await;

    assert_too_complex(&response);
    assert!(response.data.into_json().unwrap().is_null());
}

#[tokio::test]
async fn test_nested_connections_multiply() {
    let state = setup_state();
    let schema = schema_for(&state);

    let query = r#"
        {
            posts(first: 20) {
                edges {
                    node {
                        author {
                            posts(first: 20) { edges { node { id } } }
                        }
                    }
                }
            }
        }
    "#;
    let response = execute_graphql(&schema, query, None).await;

    assert_too_complex(&response);
}

#[tokio::test]
async fn test_variables_feed_the_cost_function() {
    let state = setup_state();
    let schema = schema_for(&state);

    let query = r#"
        query People($limit: Int) { people(limit: $limit) { id name age } }
    "#;

    let cheap = execute_graphql(
        &schema,
        query,
        Some(async_graphql::Variables::from_json(
            serde_json::json!({ "limit": 5 }),
        )),
    )
    .await;
    assert!(cheap.errors.is_empty(), "{:?}", cheap.errors);

    let expensive = execute_graphql(
        &schema,
        query,
        Some(async_graphql::Variables::from_json(
            serde_json::json!({ "limit": 90 }),
        )),
    )
    .await;
    assert_too_complex(&expensive);
}

#[tokio::test]
async fn test_disabled_analysis_lets_expensive_queries_through() {
    let state = setup_state();
    let schema = schema_with(
        &state,
        GqlConfig {
            analyze_complexity: false,
            ..GqlConfig::default()
        },
    );

    let response =
        execute_graphql(&schema, "{ people(limit: 100) { id name age } }", None).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
}

#[tokio::test]
async fn test_custom_threshold() {
    let state = setup_state();
    let schema = schema_with(
        &state,
        GqlConfig {
            max_complexity: 5,
            ..GqlConfig::default()
        },
    );

    let ok = execute_graphql(&schema, "{ people(limit: 2) { id name } }", None).await;
    assert!(ok.errors.is_empty(), "{:?}", ok.errors);

    let rejected = execute_graphql(&schema, "{ people(limit: 3) { id name } }", None).await;
    assert_too_complex(&rejected);
}

#[tokio::test]
async fn test_complexity_report_extension() {
    let state = setup_state();
    let schema = schema_with(
        &state,
        GqlConfig {
            complexity_report: true,
            ..GqlConfig::default()
        },
    );

    let response = execute_graphql(&schema, "{ people(limit: 3) { id name } }", None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let analyzer = response
        .extensions
        .get("analyzer")
        .cloned()
        .expect("analyzer extension should be present")
        .into_json()
        .unwrap();
    assert_eq!(analyzer["complexity"], 6);
}

#[tokio::test]
async fn test_depth_limit() {
    let state = setup_state();
    let schema = schema_with(
        &state,
        GqlConfig {
            max_depth: 3,
            ..GqlConfig::default()
        },
    );

    let response =
        execute_graphql(&schema, "{ posts { edges { node { id } } } }", None).await;

    assert!(!response.errors.is_empty());
    assert!(
        response.errors[0].message.contains("too deep"),
        "unexpected message: {}",
        response.errors[0].message
    );
}

#[tokio::test]
async fn test_nodes_batch_is_priced_per_id() {
    let state = setup_state();
    let schema = schema_with(
        &state,
        GqlConfig {
            complexity_report: true,
            ..GqlConfig::default()
        },
    );

    for (query, expected) in [
        ("{ nodes(ids: []) { id } }", 0),
        (r#"{ nodes(ids: ["a", "b", "c"]) { id } }"#, 3),
    ] {
        let response = execute_graphql(&schema, query, None).await;
        let analyzer = response
            .extensions
            .get("analyzer")
            .cloned()
            .expect("analyzer extension should be present")
            .into_json()
            .unwrap();
        assert_eq!(analyzer["complexity"], expected, "{query}");
    }
}
