//! HTTP Request domain types

mod body;
mod draft;
mod kv;
mod method;
mod saved;
mod spec;

pub use body::{BodyType, RequestBody};
pub use draft::RequestDraft;
pub use kv::{KeyValueMap, KeyValuePair};
pub use method::HttpMethod;
pub use saved::SavedRequest;
pub use spec::RequestSpec;
