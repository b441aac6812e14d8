//! Antiposta Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod http;
pub mod persistence;

pub use adapters::{ReqwestHttpClient, default_user_agent};
pub use http::{BodyBuildError, BuiltBody, build_body};
pub use persistence::{JsonFileStore, MemoryStore, STORE_FILE_NAME};
