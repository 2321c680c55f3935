mod channel_notifier;
mod data_stores;
mod deletion_guard;
mod error;
mod ids;
mod member;
mod member_password_hash;
mod member_set;
mod member_update;
mod password;
mod person_name;
mod privilege;
mod project;
mod record;
mod role;
mod session;
mod sprint;
mod status;
mod task;
mod username;
pub mod validation;

pub use channel_notifier::*;
pub use data_stores::*;
pub use deletion_guard::*;
pub use error::*;
pub use ids::*;
pub use member::*;
pub use member_password_hash::*;
pub use member_set::*;
pub use member_update::*;
pub use password::*;
pub use person_name::*;
pub use privilege::*;
pub use project::*;
pub use record::*;
pub use role::*;
pub use session::*;
pub use sprint::*;
pub use status::*;
pub use task::*;
pub use username::*;
