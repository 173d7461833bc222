use corefacility::{models::AccessLevel, transport::Method, Query};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::ClientTest;

fn access_levels() -> serde_json::Value {
    json!([
        {"id": 1, "alias": "full", "name": "Full access"},
        {"id": 2, "alias": "data_full", "name": "Dealing with data"},
        {"id": 3, "alias": "no_access", "name": "No access"},
    ])
}

#[tokio::test]
async fn repeated_lists_are_served_from_the_cache() {
    let mut test = ClientTest::new();
    test.respond_ok(access_levels());

    let levels = AccessLevel::list(test.client(), "project").await.unwrap();
    let aliases: Vec<_> = levels.iter().filter_map(|level| level.alias()).collect();
    assert_eq!(aliases, ["full", "data_full", "no_access"]);

    let request = test.log().pop();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "core/access-levels/");
    assert_eq!(request.query.to_string(), "type=project");

    let again = AccessLevel::list(test.client(), "project").await.unwrap();
    assert_eq!(again.len(), 3);
    assert!(test.log().is_empty());
}

#[tokio::test]
async fn cache_keys_include_the_query() {
    let mut test = ClientTest::new();
    test.respond_ok(access_levels());
    test.respond_ok(json!([{"id": 4, "alias": "add", "name": "Add data"}]));

    AccessLevel::list(test.client(), "project").await.unwrap();
    let app_levels = AccessLevel::list(test.client(), "app").await.unwrap();

    assert_eq!(app_levels.len(), 1);
    assert_eq!(test.log().len(), 2);
    assert_eq!(test.client().cache().len(), 2);
}

#[tokio::test]
async fn escaped_values_do_not_share_an_entry() {
    let mut test = ClientTest::new();
    test.respond_ok(access_levels());
    test.respond_ok(json!([{"id": 4, "alias": "add", "name": "Add data"}]));

    let nested = Query::new().param("type", "project&x=1");
    let split = Query::new().param("type", "project").param("x", 1);

    let first = test.client().find_cached::<AccessLevel>(nested).await.unwrap();
    let second = test.client().find_cached::<AccessLevel>(split).await.unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 1);
    assert_eq!(test.log().len(), 2);
    assert_eq!(test.client().cache().len(), 2);
}

#[tokio::test]
async fn clearing_the_cache_fetches_again() {
    let mut test = ClientTest::new();
    test.respond_ok(access_levels());
    test.respond_ok(access_levels());

    AccessLevel::list(test.client(), "project").await.unwrap();
    test.client().cache().clear();
    AccessLevel::list(test.client(), "project").await.unwrap();

    assert_eq!(test.log().count(Method::Get), 2);
}

#[tokio::test]
async fn clones_share_the_cache() {
    let mut test = ClientTest::new();
    test.respond_ok(access_levels());

    let client = test.client().clone();
    AccessLevel::list(&client, "project").await.unwrap();
    AccessLevel::list(test.client(), "project").await.unwrap();

    assert_eq!(test.log().len(), 1);
}

#[tokio::test]
async fn failed_requests_are_not_cached() {
    let mut test = ClientTest::new();
    test.fail_network("connection reset by peer");
    test.respond_ok(access_levels());

    let err = AccessLevel::list(test.client(), "project").await.unwrap_err();
    assert!(err.is_network());
    assert!(test.client().cache().is_empty());

    AccessLevel::list(test.client(), "project").await.unwrap();
    assert_eq!(test.log().len(), 2);
}
