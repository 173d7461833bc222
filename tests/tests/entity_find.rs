use corefacility::{
    models::{Group, User},
    transport::Method,
    EntityState, ErrorClass, Found, Query,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{page, user_record, ClientTest};

const NEXT: &str = "http://lab.example.org/api/v1/core/users/?limit=2&offset=2";
const PREVIOUS: &str = "http://lab.example.org/api/v1/core/users/?limit=2";

#[tokio::test]
async fn get_by_id_and_alias() {
    let mut test = ClientTest::new();

    test.respond_ok(user_record(3, "ivan"));
    let user = test.client().get::<User>(3).await.unwrap();
    assert_eq!(user.state(), EntityState::Loaded);
    assert_eq!(user.login(), Some("ivan"));
    assert_eq!(test.log().pop().path, "core/users/3/");

    test.respond_ok(user_record(3, "ivan"));
    test.client().get::<User>("ivan").await.unwrap();
    let request = test.log().pop();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "core/users/ivan/");
}

#[tokio::test]
async fn get_missing_entity_is_not_found() {
    let test = ClientTest::new();
    test.respond(404, json!({"detail": "Not found."}));

    let err = test.client().get::<User>(42).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::NotFound);
    assert_eq!(err.http_detail(), Some("Not found."));
}

#[tokio::test]
async fn lookup_cannot_leave_the_collection() {
    let mut test = ClientTest::new();

    for lookup in ["../groups/7", "", "a/b"] {
        let err = test.client().get::<User>(lookup).await.unwrap_err();
        assert_eq!(err.class(), ErrorClass::InvalidRoute, "{lookup:?}");
    }
    assert!(test.log().is_empty());
}

#[tokio::test]
async fn find_returns_a_page_for_paginated_types() {
    let mut test = ClientTest::new();
    test.respond_ok(page(
        5,
        Some(NEXT),
        None,
        json!([user_record(1, "ivan"), user_record(2, "olga")]),
    ));

    let found = test
        .client()
        .find::<User>(Query::new().search("an").basic_profile())
        .await
        .unwrap();

    let request = test.log().pop();
    assert_eq!(request.path, "core/users/");
    assert_eq!(request.query.to_string(), "q=an&profile=basic");

    assert!(found.is_page());
    assert_eq!(found.total_count(), 5);

    let page = found.into_page().unwrap();
    assert_eq!(page.page_count(), 2);
    assert!(page.has_next());
    assert!(!page.has_previous());

    let logins: Vec<_> = page.iter().filter_map(|user| user.login()).collect();
    assert_eq!(logins, ["ivan", "olga"]);
    assert!(page.iter().all(|user| user.state() == EntityState::Found));
}

#[tokio::test]
async fn page_navigation_returns_new_pages() {
    let mut test = ClientTest::new();
    test.respond_ok(page(
        3,
        Some(NEXT),
        None,
        json!([user_record(1, "ivan"), user_record(2, "olga")]),
    ));

    let first = test
        .client()
        .find::<User>(Query::new())
        .await
        .unwrap()
        .into_page()
        .unwrap();
    test.log().clear();

    test.respond_ok(page(3, None, Some(PREVIOUS), json!([user_record(3, "petr")])));
    let second = first.next().await.unwrap();

    let request = test.log().pop();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, NEXT);

    assert_eq!(second.page_count(), 1);
    assert_eq!(second[0].login(), Some("petr"));
    assert!(second.has_previous());

    // The page we navigated from is untouched
    assert_eq!(first.page_count(), 2);
    assert_eq!(first.next_cursor(), Some(NEXT));

    test.respond_ok(page(
        3,
        Some(NEXT),
        None,
        json!([user_record(1, "ivan"), user_record(2, "olga")]),
    ));
    let back = second.previous().await.unwrap();
    assert_eq!(test.log().pop().path, PREVIOUS);
    assert_eq!(back.page_count(), 2);
}

#[tokio::test]
async fn navigating_past_the_ends_sends_nothing() {
    let mut test = ClientTest::new();
    test.respond_ok(page(1, None, None, json!([user_record(1, "ivan")])));

    let only = test
        .client()
        .find::<User>(Query::new())
        .await
        .unwrap()
        .into_page()
        .unwrap();
    test.log().clear();

    assert!(only.is_first_page() && only.is_last_page());

    let err = only.next().await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::PageRange);
    assert_eq!(err.to_string(), "page out of range: there is no next page");
    assert!(only.previous().await.unwrap_err().is_page_range());
    assert!(test.log().is_empty());
}

#[tokio::test]
async fn unshift_adds_a_created_entity() {
    let test = ClientTest::new();
    test.respond_ok(page(2, None, None, json!([{"id": 1, "name": "Lab"}, {"id": 2, "name": "Core"}])));

    let mut groups = test
        .client()
        .find::<Group>(Query::new())
        .await
        .unwrap()
        .into_page()
        .unwrap();

    let mut group = test.client().new_entity::<Group>().unwrap();
    group.set_name("Imaging").unwrap();
    test.respond(201, json!({"id": 3, "name": "Imaging", "governor": {"id": 1}}));
    group.create().await.unwrap();

    groups.unshift(group);
    assert_eq!(groups.total_count(), 3);
    assert_eq!(groups.page_count(), 3);

    let names: Vec<_> = groups.iter().filter_map(|group| group.name()).collect();
    assert_eq!(names, ["Imaging", "Lab", "Core"]);
    assert_eq!(groups[0].state(), EntityState::Saved);
}

#[tokio::test]
async fn found_entities_become_changed_when_edited() {
    let mut test = ClientTest::new();
    test.respond_ok(page(1, None, None, json!([user_record(1, "ivan")])));

    let mut users = test
        .client()
        .find::<User>(Query::new())
        .await
        .unwrap()
        .into_items();
    test.log().clear();

    let user = &mut users[0];
    user.set_name("Ivan").unwrap();
    assert_eq!(user.state(), EntityState::Changed);

    let mut saved = user_record(1, "ivan");
    saved["name"] = json!("Ivan");
    test.respond_ok(saved);
    user.update().await.unwrap();

    assert_eq!(test.log().pop().path, "core/users/1/");
    assert_eq!(user.state(), EntityState::Saved);
}

#[tokio::test]
async fn inconsistent_page_is_a_server_side_error() {
    let test = ClientTest::new();
    test.respond_ok(page(1, None, None, json!([user_record(1, "ivan"), user_record(2, "olga")])));

    let err = test.client().find::<User>(Query::new()).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::ServerSide);
}

#[tokio::test]
async fn malformed_record_is_a_server_side_error() {
    let test = ClientTest::new();
    test.respond_ok(json!({"id": 1, "login": "ivan", "is_locked": "sometimes"}));

    let err = test.client().get::<User>(1).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::ServerSide);
    assert_eq!(err.invalid_field(), Some("is_locked"));
}

#[tokio::test]
async fn found_items_are_a_list_for_flat_types() {
    let test = ClientTest::new();
    test.respond_ok(json!([{"id": 1, "alias": "full", "name": "Full access"}]));

    let found = test
        .client()
        .find::<corefacility::models::AccessLevel>(Query::new())
        .await
        .unwrap();

    assert!(matches!(found, Found::List(_)));
    assert_eq!(found.len(), 1);
    assert_eq!(found.items()[0].alias(), Some("full"));
}
