use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    ChannelNotifier, MemberStore, ProjectStore, Record, RecordStore,
    SessionStore, Sprint, TaskStore,
};

pub type MemberStoreType = Arc<RwLock<dyn MemberStore + Send + Sync>>;
pub type ProjectStoreType = Arc<RwLock<dyn ProjectStore + Send + Sync>>;
pub type TaskStoreType = Arc<RwLock<dyn TaskStore + Send + Sync>>;
pub type SessionStoreType = Arc<RwLock<dyn SessionStore + Send + Sync>>;
pub type RecordStoreType<R> = Arc<RwLock<dyn RecordStore<R> + Send + Sync>>;
pub type NotifierType = Arc<dyn ChannelNotifier + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub member_store: MemberStoreType,
    pub project_store: ProjectStoreType,
    pub task_store: TaskStoreType,
    pub session_store: SessionStoreType,
    pub sprint_store: RecordStoreType<Sprint>,
    pub notifier: NotifierType,
}

impl AppState {
    pub fn new(
        member_store: MemberStoreType,
        project_store: ProjectStoreType,
        task_store: TaskStoreType,
        session_store: SessionStoreType,
        sprint_store: RecordStoreType<Sprint>,
        notifier: NotifierType,
    ) -> Self {
        Self {
            member_store,
            project_store,
            task_store,
            session_store,
            sprint_store,
            notifier,
        }
    }
}

/// Gives the generic record routes the store for one record type.
pub trait RecordStoreProvider<R: Record> {
    fn record_store(&self) -> RecordStoreType<R>;
}

impl RecordStoreProvider<Sprint> for AppState {
    fn record_store(&self) -> RecordStoreType<Sprint> {
        self.sprint_store.clone()
    }
}
