//! quizdb-import library interface
//!
//! Exposes the pipeline and its stages for integration testing against an
//! in-memory store fake.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod store;

pub use crate::error::{ImportError, Result};
pub use crate::pipeline::{run_import, ImportOptions, ImportRun};
