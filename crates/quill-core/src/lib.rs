//! # Quill Core
//!
//! The domain layer of the Quill content API.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the input validation pipeline, and the repository ports.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
