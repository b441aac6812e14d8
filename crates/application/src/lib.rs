//! Antiposta Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The send request use case
//! - The storage adapter
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod send_request;
pub mod storage;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError, KeyValueStore, StoreError};
pub use send_request::{SendRequest, SendRequestError, SendResult, SendResultExt, prepare};
pub use storage::{DEFAULT_APP_NAME, StorageAdapter, StorageKeys};
