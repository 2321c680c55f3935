use crate::helpers::{add_project, mock_slack, sign_up, TestApp, PASSWORD};
use move_forward::{
    client::{
        ApiClient, LogInForm, Mode, Navigation, ProjectDetailView, ProjectList,
        EMPTY_LABEL,
    },
    domain::{ProjectId, Status},
};
use secrecy::Secret;
use test_context::test_context;

fn api_client(app: &TestApp) -> ApiClient {
    ApiClient::new(app.address.clone(), reqwest::Client::new())
}

#[test_context(TestApp)]
#[tokio::test]
async fn log_in_form_reports_failures_and_navigates_home(app: &mut TestApp) {
    let (id, username) = sign_up(app, "user").await;
    let client = api_client(app);

    let mut form = LogInForm::default();
    form.username = username.clone();
    form.password = Some(Secret::new("Wr0ngPass".to_owned()));
    assert_eq!(form.run_pending(&client).await, None);

    form.submit();
    assert!(form.is_submitting());
    assert_eq!(form.run_pending(&client).await, None);
    assert!(!form.is_submitting());
    assert_eq!(form.errors(), ["Incorrect username or password"]);

    form.password = Some(Secret::new(PASSWORD.to_owned()));
    form.submit();
    assert_eq!(
        form.run_pending(&client).await,
        Some(Navigation::Home { refresh: true })
    );
    assert!(form.errors().is_empty());

    let (_, member) = form.session().expect("logged in");
    assert_eq!(member.id, id);
    assert_eq!(member.username, username);
}

#[test_context(TestApp)]
#[tokio::test]
async fn project_detail_edits_and_deletes(app: &mut TestApp) {
    mock_slack(app).await;
    let (member, _) = sign_up(app, "user").await;
    let (admin, admin_username) = sign_up(app, "admin").await;
    let project_id = add_project(app, "Lenten", &admin, &[admin]).await;

    let client = api_client(app);
    let (credentials, _) = client
        .log_in(&admin_username, &Secret::new(PASSWORD.to_owned()))
        .await
        .expect("admin can log in");

    let mut view = ProjectDetailView::new(ProjectId::parse(&project_id).unwrap());
    view.refresh(&client, &credentials).await;
    assert_eq!(view.page_error(), None);
    assert!(view.begin_edit());

    assert_eq!(view.candidate(), Some(member));
    view.add_candidate();
    assert_eq!(view.candidate(), None);

    let form = view.form_mut().expect("editing");
    form.name = " ".to_owned();
    view.submit(&client, &credentials).await;
    assert_eq!(view.form_errors(), ["Project name cannot be blank"]);
    assert!(matches!(view.mode(), Mode::Edit(_)));

    let form = view.form_mut().expect("still editing");
    form.name = "Easter".to_owned();
    form.status = Status::Complete;
    view.submit(&client, &credentials).await;
    assert!(view.form_errors().is_empty());
    assert_eq!(view.mode(), &Mode::View);
    assert!(view.project.needs_fetch());

    view.refresh(&client, &credentials).await;
    let project = view.project.value().expect("project reloaded");
    assert_eq!(project.name, "Easter");
    assert_eq!(project.status, Status::Complete);
    assert_eq!(project.team.len(), 2);

    assert_eq!(
        view.delete(&client, &credentials).await,
        Some(Navigation::Projects)
    );

    let mut view = ProjectDetailView::new(ProjectId::parse(&project_id).unwrap());
    view.refresh(&client, &credentials).await;
    assert_eq!(view.page_error(), Some("Project not found"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn project_list_loads_and_paginates(app: &mut TestApp) {
    mock_slack(app).await;
    let (admin, username) = sign_up(app, "admin").await;

    let client = api_client(app);
    let (credentials, _) = client
        .log_in(&username, &Secret::new(PASSWORD.to_owned()))
        .await
        .unwrap();

    let mut list = ProjectList::default();
    list.refresh(&client, &credentials).await;
    assert_eq!(list.empty_label(), Some(EMPTY_LABEL));

    for n in 0..7 {
        add_project(app, &format!("Project {n}"), &admin, &[admin]).await;
    }

    list.projects.mark_stale();
    list.refresh(&client, &credentials).await;
    assert_eq!(list.error(), None);
    assert_eq!(list.empty_label(), None);

    assert!(list.set_page_size(5));
    assert_eq!(list.page_count(), 2);
    list.set_page(1);
    let rows = list.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].slack_channel, "C0123456");
}
