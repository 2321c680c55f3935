use crate::helpers::{
    get_json_response_body, log_in, sign_up, PersistentTestApp, TestApp,
    PASSWORD,
};
use move_forward::ErrorResponse;
use serde_json::{json, Value};
use test_context::test_context;

fn profile(username: &str) -> Value {
    json!({
        "firstName": "Dougal",
        "lastName": "McGuire",
        "role": "Curate",
        "username": username
    })
}

fn with(mut body: Value, fields: Value) -> Value {
    for (key, value) in fields.as_object().unwrap() {
        body[key] = value.clone();
    }
    body
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_non_admin_updating_others(app: &mut TestApp) {
    let (other, other_username) = sign_up(app, "user").await;
    sign_up(app, "user").await;

    let response = app
        .put(&format!("/members/{other}"), &profile(&other_username))
        .await;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(get_json_response_body(response).await, json!({}));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_require_current_password_for_own_account(app: &mut TestApp) {
    let (id, username) = sign_up(app, "user").await;
    let route = format!("/members/{id}");

    // The current password is checked exactly as typed.
    let padded = format!(" {PASSWORD} ");
    for current in [None, Some("Wr0ngPass"), Some(""), Some(padded.as_str())] {
        let mut body = profile(&username);
        if let Some(current) = current {
            body["currPassword"] = json!(current);
        }

        let response = app.put(&route, &body).await;
        assert_eq!(response.status().as_u16(), 400);
        let error = response.json::<ErrorResponse>().await.unwrap();
        assert_eq!(error.errors, ["Incorrect password"]);
    }

    let response = app
        .put(&route, &with(profile(&username), json!({ "currPassword": PASSWORD })))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["firstName"], "Dougal");
    assert!(body["data"].get("password").is_none());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_ignore_privilege_on_own_account(app: &mut TestApp) {
    let (id, username) = sign_up(app, "user").await;

    let response = app
        .put(
            &format!("/members/{id}"),
            &with(
                profile(&username),
                json!({ "currPassword": PASSWORD, "privilege": "admin" }),
            ),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["privilege"], "user");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_change_own_password(app: &mut TestApp) {
    let (id, username) = sign_up(app, "user").await;
    let new_password = "N3wPassword";

    let response = app
        .put(
            &format!("/members/{id}"),
            &with(
                profile(&username),
                json!({
                    "currPassword": PASSWORD,
                    "newPassword": new_password,
                    "confirmNewPassword": "N3wPassw0rd"
                }),
            ),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(error.errors, ["New Passwords do not match"]);

    let response = app
        .put(
            &format!("/members/{id}"),
            &with(
                profile(&username),
                json!({
                    "currPassword": PASSWORD,
                    "newPassword": new_password,
                    "confirmNewPassword": new_password
                }),
            ),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .post_log_in(&json!({ "username": username, "password": new_password }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_let_admins_update_others(app: &mut TestApp) {
    let (other, other_username) = sign_up(app, "user").await;
    sign_up(app, "admin").await;
    let route = format!("/members/{other}");

    let response = app.put(&route, &profile(&other_username)).await;
    assert_eq!(response.status().as_u16(), 400);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(error.errors, ["Invalid value for Privilege"]);

    let response = app
        .put(
            &route,
            &with(profile(&other_username), json!({ "privilege": "admin" })),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["privilege"], "admin");
    assert_eq!(body["data"]["lastName"], "McGuire");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_usernames_held_by_others(app: &mut TestApp) {
    reject_usernames_held_by_others(app).await;
}

#[test_context(PersistentTestApp)]
#[tokio::test]
async fn should_reject_usernames_held_by_others_in_postgres(
    app: &mut PersistentTestApp,
) {
    reject_usernames_held_by_others(app).await;
}

async fn reject_usernames_held_by_others(app: &TestApp) {
    let (_, taken) = sign_up(app, "user").await;
    let (id, username) = sign_up(app, "user").await;
    let route = format!("/members/{id}");

    let response = app
        .put(&route, &with(profile(&taken), json!({ "currPassword": PASSWORD })))
        .await;
    assert_eq!(response.status().as_u16(), 400);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(
        error.errors,
        ["Username is already in use. Please enter a different username"]
    );

    // Keeping one's own username is not a clash.
    let response = app
        .put(&route, &with(profile(&username), json!({ "currPassword": PASSWORD })))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_members(app: &mut TestApp) {
    let (_, admin) = sign_up(app, "admin").await;
    log_in(app, &admin).await;

    let response = app
        .put(
            &format!("/members/{}", uuid::Uuid::new_v4()),
            &with(profile("someone"), json!({ "privilege": "user" })),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(error.errors, ["Cannot update member: Member not found"]);
}
