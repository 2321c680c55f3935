mod curr_user;
mod delete_member;
mod get_member;
mod get_members;
mod log_in;
mod log_out;
mod member_record;
mod sign_up;
mod update_member;

pub use curr_user::*;
pub use delete_member::*;
pub use get_member::*;
pub use get_members::*;
pub use log_in::*;
pub use log_out::*;
pub use member_record::*;
pub use sign_up::*;
pub use update_member::*;
