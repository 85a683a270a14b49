//! Interactive user intake backed by a local SQLite store.
//!
//! # Intention
//!
//! - Collect a user's name, age, email and notes from a terminal prompt.
//! - Validate the inputs and persist one record into the `users` table.
//! - Keep the SQLite connection an explicit handle owned by the orchestrator.
//!
//! # Architectural Boundaries
//!
//! - SQLite code lives in [`sqlite`]; console prompting lives in [`input`].
//! - [`app`] only sequences the two and reports outcomes.

pub mod app;
pub mod error;
pub mod input;
pub mod sqlite;
pub mod users;

pub use error::{Error, Result};
pub use sqlite::{SaveOutcome, SqliteConfig, SqliteStore};
pub use users::{NewUser, UserRecord};
