//! Repository ingestion: fetch, walk, classify.
//!
//! - **fetch**: clone a remote repository into a local directory
//! - **context**: run-scoped temporary workspace
//! - **walker**: deterministic file enumeration
//! - **orchestrator**: concurrent classification into a [`Source`]
//!
//! [`Source`]: crate::core::types::Source

pub mod context;
pub mod fetch;
pub mod orchestrator;
pub mod walker;

pub use context::RunContext;
pub use fetch::{GitCli, RepositorySource};
pub use orchestrator::{ClassificationRun, RepositoryClassifier};
pub use walker::FileWalker;
