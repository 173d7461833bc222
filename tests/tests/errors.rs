use corefacility::{
    models::{Group, User},
    EntityState, ErrorClass, Query,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{user_record, ClientTest};

#[tokio::test]
async fn statuses_map_to_classes() {
    let cases = [
        (400, ErrorClass::BadRequest),
        (401, ErrorClass::Unauthorized),
        (403, ErrorClass::Forbidden),
        (404, ErrorClass::NotFound),
        (405, ErrorClass::MethodNotAllowed),
        (406, ErrorClass::NotAcceptable),
        (411, ErrorClass::LengthRequired),
        (429, ErrorClass::TooManyRequests),
        (500, ErrorClass::ServerSide),
        (502, ErrorClass::ServerSide),
        (409, ErrorClass::Http),
    ];

    let test = ClientTest::new();
    for (status, class) in cases {
        test.respond(status, json!({"detail": "nope"}));
        let err = test.client().get::<Group>(1).await.unwrap_err();
        assert_eq!(err.class(), class, "status {status}");
        assert_eq!(err.http_status(), Some(status));
    }
}

#[tokio::test]
async fn detail_and_code_are_kept() {
    let test = ClientTest::new();
    test.respond(
        403,
        json!({"detail": "You do not have permission to perform this action.", "code": "permission_denied"}),
    );

    let err = test.client().find::<User>(Query::new()).await.unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(
        err.http_detail(),
        Some("You do not have permission to perform this action.")
    );
    assert_eq!(err.http_code(), Some("permission_denied"));
}

#[tokio::test]
async fn network_failures_keep_entity_state() {
    let test = ClientTest::new();

    test.respond_ok(user_record(3, "ivan"));
    let mut user = test.client().get::<User>(3).await.unwrap();

    test.fail_network("connection refused");
    let err = user.delete().await.unwrap_err();

    assert_eq!(err.class(), ErrorClass::Network);
    assert_eq!(err.to_string(), "network error: connection refused");
    assert_eq!(user.state(), EntityState::Loaded);
}

#[tokio::test]
async fn wrong_response_shapes_are_server_side() {
    let test = ClientTest::new();

    // A paginated type answered with a bare list
    test.respond_ok(json!([user_record(1, "ivan")]));
    let err = test.client().find::<User>(Query::new()).await.unwrap_err();
    assert!(err.is_server_side());

    // A single entity answered with a list
    test.respond_ok(json!([]));
    let err = test.client().get::<User>(1).await.unwrap_err();
    assert!(err.is_server_side());
}

#[tokio::test]
async fn server_validation_errors_are_bad_requests() {
    let test = ClientTest::new();
    let mut user = test.client().new_entity::<User>().unwrap();
    user.set_login("ivan").unwrap();

    test.respond(400, json!({"login": ["user with this login already exists."]}));
    let err = user.create().await.unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(
        err.http_detail(),
        Some(r#"{"login":["user with this login already exists."]}"#)
    );
    assert_eq!(user.state(), EntityState::Creating);
}
