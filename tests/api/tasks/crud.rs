use crate::helpers::{
    add_project, add_task, get_json_response_body, log_in, mock_slack,
    sign_up, task_body, TestApp,
};
use move_forward::{domain::MemberId, ErrorResponse};
use serde_json::json;
use test_context::test_context;

/// An admin-created project with `member` on its team, leaving the app
/// logged in as the admin.
async fn project_for(app: &TestApp, member: &MemberId) -> String {
    mock_slack(app).await;
    let (admin, _) = sign_up(app, "admin").await;
    add_project(app, "Lenten", &admin, &[*member]).await
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_create_tasks_for_any_member(app: &mut TestApp) {
    let (member, username) = sign_up(app, "user").await;
    let project = project_for(app, &member).await;
    log_in(app, &username).await;

    let response = app.post("/tasks", &task_body(&project, &[member])).await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    let data = &body["data"];
    assert_eq!(data["title"], "Ring the bell");
    assert_eq!(data["project"], project.as_str());
    assert_eq!(data["createdBy"]["username"], username.as_str());
    assert_eq!(data["assignees"][0]["_id"], member.to_string());
    assert_eq!(data["sprint"], serde_json::Value::Null);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_references(app: &mut TestApp) {
    let (member, _) = sign_up(app, "user").await;
    let project = project_for(app, &member).await;
    let unknown = uuid::Uuid::new_v4().to_string();

    let test_cases = [
        (
            json!({}),
            vec![
                "Invalid value for Title",
                "Invalid value for Description",
                "Invalid value for Project",
                "Invalid value for Status",
                "Invalid value for Priority",
                "Invalid value for Assignees",
            ],
        ),
        (
            json!({
                "title": "Ring the bell",
                "description": "Loudly",
                "project": unknown,
                "status": "Open",
                "priority": "Low",
                "sprint": unknown,
                "assignees": [unknown]
            }),
            vec![
                "Project must be an existing project",
                "Sprint must be an existing sprint",
                "Assignees must be existing members",
            ],
        ),
        (
            json!({
                "title": "",
                "description": "Loudly",
                "project": project,
                "status": "Done",
                "priority": "Low",
                "sprint": "",
                "assignees": []
            }),
            vec!["Task title cannot be blank", "Invalid value for Status"],
        ),
    ];

    for (body, expected) in test_cases {
        let response = app.post("/tasks", &body).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for {body}");

        let error = response.json::<ErrorResponse>().await.unwrap();
        assert_eq!(error.errors, expected, "Failed for {body}");
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_filter_tasks_by_project(app: &mut TestApp) {
    let (member, _) = sign_up(app, "user").await;
    let first = project_for(app, &member).await;
    let second = add_project(app, "Bell tower", &member, &[member]).await;

    let a = add_task(app, &first, &[member]).await;
    add_task(app, &second, &[member]).await;
    let c = add_task(app, &first, &[]).await;

    let response = app.get(&format!("/tasks?project={first}")).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    let ids: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["_id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(ids, [a, c]);

    let body = get_json_response_body(app.get("/tasks").await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let body = get_json_response_body(app.get("/tasks?project=garbage").await).await;
    assert_eq!(body["data"], json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_only_let_creators_and_admins_modify(app: &mut TestApp) {
    let (creator, creator_username) = sign_up(app, "user").await;
    let (_, bystander_username) = sign_up(app, "user").await;
    let project = project_for(app, &creator).await;

    log_in(app, &creator_username).await;
    let task = add_task(app, &project, &[creator]).await;
    let route = format!("/tasks/{task}");

    let mut update = task_body(&project, &[creator]);
    update["status"] = json!("Complete");

    log_in(app, &bystander_username).await;
    assert_eq!(app.put(&route, &update).await.status().as_u16(), 403);
    assert_eq!(app.delete(&route).await.status().as_u16(), 403);
    assert_eq!(app.get(&route).await.status().as_u16(), 200);

    log_in(app, &creator_username).await;
    let response = app.put(&route, &update).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["status"], "Complete");
    assert_eq!(body["data"]["createdBy"]["_id"], creator.to_string());

    sign_up(app, "admin").await;
    let response = app.delete(&route).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["_id"], task.as_str());

    let response = app.get(&route).await;
    assert_eq!(response.status().as_u16(), 404);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(error.errors, ["Task not found"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_attach_existing_sprints(app: &mut TestApp) {
    let (member, _) = sign_up(app, "user").await;
    let project = project_for(app, &member).await;

    let response = app
        .post(
            "/sprints",
            &json!({
                "name": "Advent",
                "project": project,
                "startDate": "2026-11-29",
                "endDate": "2026-12-24"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let sprint = get_json_response_body(response).await["data"]["_id"]
        .as_str()
        .unwrap()
        .to_owned();

    let mut body = task_body(&project, &[member]);
    body["sprint"] = json!(sprint);
    let response = app.post("/tasks", &body).await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["sprint"], sprint.as_str());
}
