use corefacility::{
    models::User,
    transport::{Body, FileUpload, Method},
    EntityState, ErrorClass,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{user_record, ClientTest};

async fn loaded_user(test: &mut ClientTest) -> User {
    test.respond_ok(user_record(3, "ivan"));
    let user = test.client().get::<User>(3).await.unwrap();
    test.log().clear();
    user
}

#[tokio::test]
async fn upload_sends_the_file_alone() {
    let mut test = ClientTest::new();
    let mut user = loaded_user(&mut test).await;

    let mut uploaded = user_record(3, "ivan");
    uploaded["avatar"] = json!("/media/avatars/ivan.png");
    test.respond_ok(uploaded);

    user.avatar()
        .unwrap()
        .upload(FileUpload::new("ivan.png", b"\x89PNG".to_vec()).content_type("image/png"))
        .await
        .unwrap();

    let request = test.log().pop();
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.path, "core/users/3/avatar/");
    let Body::Multipart(file) = &request.body else {
        panic!("expected a multipart body, got {:?}", request.body);
    };
    assert_eq!(file.part, "avatar");
    assert_eq!(file.file_name, "ivan.png");
    assert_eq!(file.content_type.as_deref(), Some("image/png"));

    assert!(test.log().is_empty());
    assert_eq!(user.avatar().unwrap().url(), Some("/media/avatars/ivan.png"));
    assert_eq!(user.state(), EntityState::Loaded);
}

#[tokio::test]
async fn upload_keeps_unsaved_edits() {
    let mut test = ClientTest::new();
    let mut user = loaded_user(&mut test).await;
    user.set_name("Draft").unwrap();

    let mut uploaded = user_record(3, "ivan");
    uploaded["avatar"] = json!("/media/avatars/ivan.png");
    test.respond_ok(uploaded);

    user.avatar()
        .unwrap()
        .upload(FileUpload::new("ivan.png", vec![0u8; 4]))
        .await
        .unwrap();

    assert_eq!(user.name(), Some("Draft"));
    assert_eq!(user.state(), EntityState::Changed);
    assert_eq!(user.changed_fields().collect::<Vec<_>>(), ["name"]);
}

#[tokio::test]
async fn clear_removes_the_file() {
    let mut test = ClientTest::new();

    let mut record = user_record(3, "ivan");
    record["avatar"] = json!("/media/avatars/ivan.png");
    test.respond_ok(record);
    let mut user = test.client().get::<User>(3).await.unwrap();
    test.log().clear();

    test.respond_no_content();
    user.avatar().unwrap().clear().await.unwrap();

    let request = test.log().pop();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.path, "core/users/3/avatar/");
    assert_eq!(user.avatar().unwrap().url(), None);
}

#[tokio::test]
async fn password_generation() {
    let mut test = ClientTest::new();
    let mut user = loaded_user(&mut test).await;

    test.respond_ok(json!({"password": "hE7#kd0Q"}));
    let password = user.password().unwrap().generate().await.unwrap();
    assert_eq!(password, "hE7#kd0Q");

    let request = test.log().pop();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "core/users/3/password-reset/");

    assert_eq!(user.password().unwrap().value(), Some("hE7#kd0Q"));
    assert!(!user.fields().contains_key("password"));
    assert!(!user.has_changes());
}

#[tokio::test]
async fn password_response_without_password_is_server_side() {
    let mut test = ClientTest::new();
    let mut user = loaded_user(&mut test).await;

    test.respond_ok(json!({}));
    let err = user.password().unwrap().generate().await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::ServerSide);
    assert_eq!(user.password().unwrap().value(), None);
}

#[tokio::test]
async fn managers_need_a_saved_entity() {
    let mut test = ClientTest::new();
    let mut user = test.client().new_entity::<User>().unwrap();

    let err = user
        .avatar()
        .unwrap()
        .upload(FileUpload::new("ivan.png", vec![]))
        .await
        .unwrap_err();
    assert!(err.is_invalid_state());
    assert!(user.password().unwrap().generate().await.unwrap_err().is_invalid_state());
    assert!(test.log().is_empty());
}

#[tokio::test]
async fn managers_only_exist_for_managed_fields() {
    let test = ClientTest::new();
    let mut user = test.client().new_entity::<User>().unwrap();

    assert!(user.file_manager("login").unwrap_err().is_validation());
    assert!(user.password_manager("avatar").unwrap_err().is_validation());
}

#[tokio::test]
async fn failed_upload_keeps_state() {
    let mut test = ClientTest::new();
    let mut user = loaded_user(&mut test).await;

    test.respond(413, json!({"detail": "Request entity too large."}));
    let err = user
        .avatar()
        .unwrap()
        .upload(FileUpload::new("huge.png", vec![0u8; 16]))
        .await
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::Http);
    assert_eq!(err.http_status(), Some(413));
    assert_eq!(user.state(), EntityState::Loaded);
}
