//! Client-side view logic for the web front-end, over a typed REST client.

mod api_client;
mod fetch_slot;
mod log_in_form;
mod navigation;
mod project_detail;
mod project_list;

pub use api_client::*;
pub use fetch_slot::*;
pub use log_in_form::*;
pub use navigation::*;
pub use project_detail::*;
pub use project_list::*;
