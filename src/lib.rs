//! Core library for the masthead editorial backend.
//!
//! This crate implements the submission lifecycle for a publishing
//! platform: manuscript and research-paper intake, the chief-editor
//! assignment engine, the multi-role review state machine, the role
//! escalation workflow, and the newsroom article approval pipeline. Only
//! one database backend (either `sqlite` or `postgres`) should be enabled
//! at a time.
cfg_if::cfg_if! {
    if #[cfg(all(feature = "sqlite", feature = "postgres", not(feature = "lint")))] {
        compile_error!("Choose either sqlite or postgres, not both");
    } else if #[cfg(feature = "sqlite")] {
        pub use diesel::sqlite::Sqlite as DbBackend;
    } else if #[cfg(feature = "postgres")] {
        pub use diesel::pg::Pg as DbBackend;
    } else {
        compile_error!("Either the 'sqlite' or 'postgres' feature must be enabled");
    }
}

pub mod actor;
pub mod assignment;
pub mod console;
pub mod db;
pub mod error;
pub mod escalation;
pub mod models;
pub mod newsroom;
pub mod notify;
pub mod review;
pub mod roles;
pub mod schema;
pub mod status;
