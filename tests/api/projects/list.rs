use crate::helpers::{
    add_project, get_json_response_body, log_out, mock_slack, sign_up, TestApp,
};
use move_forward::ErrorResponse;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_without_a_session(app: &mut TestApp) {
    sign_up(app, "user").await;
    log_out(app).await;

    let response = app.get("/projects").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_projects_to_any_member(app: &mut TestApp) {
    mock_slack(app).await;
    let (admin, _) = sign_up(app, "admin").await;
    let first = add_project(app, "Lenten", &admin, &[admin]).await;
    let second = add_project(app, "Bell tower", &admin, &[admin]).await;

    sign_up(app, "user").await;
    let response = app.get("/projects").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let projects = body["data"].as_array().expect("data is a list");
    let ids: Vec<_> = projects
        .iter()
        .map(|p| p["_id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(ids, [first, second]);
    assert_eq!(projects[0]["lead"]["_id"], admin.to_string());
    assert!(projects[0]["lead"].get("password").is_none());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_one_project(app: &mut TestApp) {
    mock_slack(app).await;
    let (admin, _) = sign_up(app, "admin").await;
    let id = add_project(app, "Lenten", &admin, &[admin]).await;

    let response = app.get(&format!("/projects/{id}")).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["name"], "Lenten");
    assert!(body["data"]["dateCreated"].is_string());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_projects(app: &mut TestApp) {
    sign_up(app, "user").await;

    for id in [uuid::Uuid::new_v4().to_string(), "nope".to_owned()] {
        let response = app.get(&format!("/projects/{id}")).await;
        assert_eq!(response.status().as_u16(), 404, "Failed for {id}");

        let error = response.json::<ErrorResponse>().await.unwrap();
        assert_eq!(error.errors, ["Project not found"]);
    }
}
