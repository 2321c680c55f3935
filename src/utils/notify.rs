use crate::{
    app_state::NotifierType,
    domain::{channel_name, Project},
};

/// Opens a channel for a new project. Failures are logged and yield `None`.
#[tracing::instrument(name = "Creating project channel", skip_all)]
pub async fn open_project_channel(
    notifier: &NotifierType,
    project_name: &str,
) -> Option<String> {
    match notifier.create_channel(&channel_name(project_name)).await {
        Ok(channel_id) => channel_id,
        Err(e) => {
            tracing::warn!("Failed to create channel for {project_name}: {e:?}");
            None
        }
    }
}

/// Renames the channel when the name changed, otherwise posts an update
/// notice into it.
#[tracing::instrument(name = "Announcing project update", skip_all)]
pub async fn announce_project_update(
    notifier: &NotifierType,
    previous_name: &str,
    project: &Project,
) {
    let Some(channel_id) = project.slack_channel_id.as_deref() else {
        return;
    };
    let name = project.name.as_ref().as_str();

    let outcome = if previous_name != name {
        notifier.rename_channel(channel_id, &channel_name(name)).await
    } else {
        notifier
            .send_channel_message(
                channel_id,
                &format!("Project {name} has been updated."),
            )
            .await
    };

    if let Err(e) = outcome {
        tracing::warn!("Failed to update channel {channel_id}: {e:?}");
    }
}

#[tracing::instrument(name = "Archiving project channel", skip_all)]
pub async fn archive_project_channel(notifier: &NotifierType, project: &Project) {
    let Some(channel_id) = project.slack_channel_id.as_deref() else {
        return;
    };

    if let Err(e) = notifier.archive_channel(channel_id).await {
        tracing::warn!("Failed to archive channel {channel_id}: {e:?}");
    }
}
