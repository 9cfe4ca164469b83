//! Pipeline stages: resolve, partition, commit, report

pub mod commit;
pub mod partition;
pub mod report;
pub mod resolver;

pub use commit::{commit, CommitMode, CommitStats};
pub use partition::{partition, Partitioned};
pub use resolver::EntityResolver;
