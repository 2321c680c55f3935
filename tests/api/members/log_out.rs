use crate::helpers::{session_token, sign_up, PersistentTestApp, TestApp};
use move_forward::domain::SessionStoreError;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_without_a_session(app: &mut TestApp) {
    let response = app.post_log_out().await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({}));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_destroy_the_session(app: &mut TestApp) {
    destroy_the_session(app).await;
}

#[test_context(PersistentTestApp)]
#[tokio::test]
async fn should_destroy_the_session_in_redis(app: &mut PersistentTestApp) {
    destroy_the_session(app).await;
}

async fn destroy_the_session(app: &TestApp) {
    sign_up(app, "user").await;
    let token = session_token(app).expect("sid cookie is set");

    let response = app.post_log_out().await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(session_token(app).is_none(), "sid cookie should be cleared");

    assert_eq!(
        app.session_store.read().await.get_session(&token).await,
        Err(SessionStoreError::SessionNotFound)
    );
    assert_eq!(app.get("/members/curr-user").await.status().as_u16(), 404);
}
