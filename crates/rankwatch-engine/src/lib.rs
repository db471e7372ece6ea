//! Rankwatch Engine - fetch and save orchestration
//!
//! Coordinates the ranking source with the snapshot store:
//! - [`fetcher`]: where payloads come from (HTTP API or a local file)
//! - [`cycle`]: one fetch-and-save pass
//! - [`scheduler`]: repeated cycles at a fixed interval

pub mod cycle;
pub mod fetcher;
pub mod scheduler;

pub use cycle::{run_cycle, CycleReport};
pub use fetcher::{FetchError, Fetcher, FileFetcher, HttpFetcher};
pub use scheduler::{ScheduleOptions, ScheduleSummary, Scheduler};
