//! Antiposta Domain - Core business types
//!
//! This crate defines the domain model for the Antiposta request workbench.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod error;
pub mod history;
pub mod id;
pub mod request;
pub mod response;
pub mod settings;
pub mod state;

pub use collection::{Collection, Environment};
pub use error::{ChoiceError, DomainError, DomainResult};
pub use history::{HistoryEntry, RequestHistory};
pub use id::generate_id;
pub use settings::Theme;
pub use state::{RequestErrorKind, RequestState};
