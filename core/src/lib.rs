pub mod api;
pub mod classification;
pub mod cli;
pub mod constants;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod terminology;
pub mod types;

pub use api::{Classification, OrderClassifier, ReferenceSets, UnresolvedReason};
pub use cli::report::SummaryReport;
pub use error::{Result, RrsError};
pub use types::*;
