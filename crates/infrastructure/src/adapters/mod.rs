//! Infrastructure adapters

mod reqwest_client;

pub use reqwest_client::{ReqwestHttpClient, default_user_agent};
