use crate::helpers::{
    add_project, add_task, get_json_response_body, mock_slack, project_body,
    sign_up, task_body, PersistentTestApp, TestApp, PASSWORD,
};
use move_forward::{
    domain::{SessionStoreError, SessionToken},
    ErrorResponse,
};
use secrecy::Secret;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_non_admins(app: &mut TestApp) {
    let (other, _) = sign_up(app, "user").await;
    sign_up(app, "user").await;

    let response = app.delete(&format!("/members/{other}")).await;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(get_json_response_body(response).await, json!({}));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_members(app: &mut TestApp) {
    sign_up(app, "admin").await;

    let response = app
        .delete(&format!("/members/{}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status().as_u16(), 404);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(error.errors, ["Cannot delete member: Member not found"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_refuse_while_a_project_relies_on_the_member(app: &mut TestApp) {
    refuse_while_a_project_relies_on_the_member(app).await;
}

#[test_context(PersistentTestApp)]
#[tokio::test]
async fn should_refuse_while_a_project_relies_on_the_member_in_postgres(
    app: &mut PersistentTestApp,
) {
    refuse_while_a_project_relies_on_the_member(app).await;
}

async fn refuse_while_a_project_relies_on_the_member(app: &TestApp) {
    mock_slack(app).await;
    let (a, _) = sign_up(app, "user").await;
    let (b, _) = sign_up(app, "user").await;
    let (admin, _) = sign_up(app, "admin").await;

    let project = add_project(app, "Parish council", &admin, &[a]).await;

    let response = app.delete(&format!("/members/{a}")).await;
    assert_eq!(response.status().as_u16(), 400);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(
        error.errors,
        [
            "This member cannot be removed due to the following possibilities: ",
            "Member is the lead of a project(s)",
            "Member is the only team member of a project(s)",
            "Member is the creator of a task(s)",
            "Member is the only assignee of a task(s)",
            "Please reassign these roles before removing this member.",
        ]
    );

    let response = app
        .put(
            &format!("/projects/{project}"),
            &project_body("Parish council", &admin, &[a, b]),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.delete(&format!("/members/{a}")).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["_id"], a.to_string());
    assert!(body["data"].get("password").is_none());

    let response = app.get(&format!("/members/{a}")).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.get(&format!("/projects/{project}")).await;
    let body = get_json_response_body(response).await;
    let team: Vec<_> = body["data"]["team"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["_id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(team, [b.to_string()]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_refuse_while_the_member_is_a_sole_assignee(app: &mut TestApp) {
    refuse_while_the_member_is_a_sole_assignee(app).await;
}

#[test_context(PersistentTestApp)]
#[tokio::test]
async fn should_refuse_while_the_member_is_a_sole_assignee_in_postgres(
    app: &mut PersistentTestApp,
) {
    refuse_while_the_member_is_a_sole_assignee(app).await;
}

async fn refuse_while_the_member_is_a_sole_assignee(app: &TestApp) {
    mock_slack(app).await;
    let (a, _) = sign_up(app, "user").await;
    let (admin, _) = sign_up(app, "admin").await;
    let project = add_project(app, "Bell tower", &admin, &[admin, a]).await;
    let task = add_task(app, &project, &[a]).await;

    let response = app.delete(&format!("/members/{a}")).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .put(&format!("/tasks/{task}"), &task_body(&project, &[a, admin]))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.delete(&format!("/members/{a}")).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_refuse_to_delete_project_leads(app: &mut TestApp) {
    mock_slack(app).await;
    let (a, _) = sign_up(app, "user").await;
    let (admin, _) = sign_up(app, "admin").await;
    add_project(app, "Bell tower", &a, &[admin]).await;

    let response = app.delete(&format!("/members/{a}")).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_end_sessions_of_deleted_members(app: &mut TestApp) {
    end_sessions_of_deleted_members(app).await;
}

#[test_context(PersistentTestApp)]
#[tokio::test]
async fn should_end_sessions_of_deleted_members_in_redis(
    app: &mut PersistentTestApp,
) {
    end_sessions_of_deleted_members(app).await;
}

async fn end_sessions_of_deleted_members(app: &TestApp) {
    let (a, username) = sign_up(app, "user").await;
    sign_up(app, "admin").await;

    // A second client keeps A logged in while the admin deletes them.
    let response = reqwest::Client::new()
        .post(format!("{}/members/log-in", app.address))
        .json(&json!({ "username": username, "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let token = response
        .cookies()
        .find(|c| c.name() == "sid")
        .and_then(|c| SessionToken::parse(Secret::new(c.value().to_owned())))
        .expect("sid cookie is set");
    assert_eq!(
        app.session_store.read().await.get_session(&token).await,
        Ok(a)
    );

    let response = app.delete(&format!("/members/{a}")).await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(
        app.session_store.read().await.get_session(&token).await,
        Err(SessionStoreError::SessionNotFound)
    );
}
