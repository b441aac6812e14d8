//! Antiposta - terminal front-end for the request workbench
//!
//! Wires configuration, storage and the HTTP client into a
//! [`Workbench`](antiposta_ui::Workbench) and drives it from a line console.

pub mod config;
pub mod console;

pub use config::{AppConfig, ConfigError};
pub use console::{Console, ConsoleCommand, ConsoleError, ParseError, parse_line};
