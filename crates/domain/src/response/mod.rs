//! HTTP Response domain types

mod raw;
mod status;
mod view;

pub use raw::HttpResponse;
pub use status::{StatusCode, StatusLine, StatusOutcome};
pub use view::{BodyView, ResponseView, is_json_content_type};
