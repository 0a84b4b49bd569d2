//! Integration tests
//!
//! Archival job, orphan reclaimer, scheduler and HTTP surface exercised
//! against in-memory collaborators.

pub mod archive_job_test;
pub mod reclaimer_test;
pub mod scheduler_test;
