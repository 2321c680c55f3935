use crate::helpers::{
    add_project, add_task, get_json_response_body, mock_slack, sign_up,
    PersistentTestApp, TestApp,
};
use move_forward::{domain::ProjectId, ErrorResponse};
use serde_json::json;
use test_context::test_context;
use wiremock::{
    matchers::{body_partial_json, path},
    Mock, ResponseTemplate,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_non_admins(app: &mut TestApp) {
    mock_slack(app).await;
    let (admin, _) = sign_up(app, "admin").await;
    let id = add_project(app, "Lenten", &admin, &[admin]).await;

    sign_up(app, "user").await;
    let response = app.delete(&format!("/projects/{id}")).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_remove_the_project_and_its_tasks(app: &mut TestApp) {
    remove_the_project_and_its_tasks(app).await;
}

#[test_context(PersistentTestApp)]
#[tokio::test]
async fn should_remove_the_project_and_its_tasks_in_postgres(
    app: &mut PersistentTestApp,
) {
    remove_the_project_and_its_tasks(app).await;
}

async fn remove_the_project_and_its_tasks(app: &TestApp) {
    Mock::given(path("/conversations.archive"))
        .and(body_partial_json(json!({ "channel": "C0123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&app.slack_server)
        .await;
    mock_slack(app).await;

    let (admin, _) = sign_up(app, "admin").await;
    let doomed = add_project(app, "Lenten", &admin, &[admin]).await;
    let kept = add_project(app, "Bell tower", &admin, &[admin]).await;
    add_task(app, &doomed, &[admin]).await;
    add_task(app, &doomed, &[admin]).await;
    add_task(app, &kept, &[admin]).await;

    let response = app.delete(&format!("/projects/{doomed}")).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["_id"], doomed.as_str());

    let response = app.get(&format!("/projects/{doomed}")).await;
    assert_eq!(response.status().as_u16(), 404);

    let tasks = app.task_store.read().await.get_tasks(None).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].project, ProjectId::parse(&kept).unwrap());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_projects(app: &mut TestApp) {
    sign_up(app, "admin").await;

    let response = app
        .delete(&format!("/projects/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(error.errors, ["Project not found"]);
}
