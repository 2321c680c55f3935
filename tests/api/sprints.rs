use crate::helpers::{get_json_response_body, TestApp};
use move_forward::ErrorResponse;
use serde_json::{json, Value};
use test_context::test_context;

fn sprint_body(name: &str, start: &str, end: &str) -> Value {
    json!({
        "name": name,
        "project": uuid::Uuid::new_v4().to_string(),
        "startDate": start,
        "endDate": end
    })
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_support_the_full_lifecycle(app: &mut TestApp) {
    let response = app
        .post("/sprints", &sprint_body("Advent", "2026-11-29", "2026-12-24"))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let created = get_json_response_body(response).await;
    let id = created["data"]["_id"].as_str().unwrap().to_owned();
    let route = format!("/sprints/{id}");

    let body = get_json_response_body(app.get("/sprints").await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let body = get_json_response_body(app.get(&route).await).await;
    assert_eq!(body["data"], created["data"]);

    let response = app
        .put(&route, &sprint_body("Christmas", "2026-12-25", "2027-01-05"))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["_id"], id.as_str());
    assert_eq!(body["data"]["name"], "Christmas");
    assert_eq!(body["data"]["startDate"], "2026-12-25");

    let response = app.delete(&route).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["data"]["name"], "Christmas");

    let response = app.get(&route).await;
    assert_eq!(response.status().as_u16(), 404);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert_eq!(error.errors, ["Sprint not found"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_sprints(app: &mut TestApp) {
    let unknown = format!("/sprints/{}", uuid::Uuid::new_v4());

    let response = app
        .put(&unknown, &sprint_body("Advent", "2026-11-29", "2026-12-24"))
        .await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(app.delete(&unknown).await.status().as_u16(), 404);
    assert_eq!(app.get("/sprints/oops").await.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_dates(app: &mut TestApp) {
    let test_cases = [
        (
            sprint_body("Advent", "2026-12-24", "2026-11-29"),
            vec!["End date cannot be before start date"],
        ),
        (
            sprint_body("", "29/11/2026", "2026-12-24"),
            vec!["Sprint name cannot be blank", "Invalid value for Start Date"],
        ),
        (
            json!({}),
            vec![
                "Invalid value for Name",
                "Invalid value for Project",
                "Invalid value for Start Date",
                "Invalid value for End Date",
            ],
        ),
    ];

    for (body, expected) in test_cases {
        let response = app.post("/sprints", &body).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for {body}");

        let error = response.json::<ErrorResponse>().await.unwrap();
        assert_eq!(error.errors, expected, "Failed for {body}");
    }
}
