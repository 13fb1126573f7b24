//! Order triage for the TrackScore dashboard.
//!
//! Orders flow through a candidate pipeline: the quality threshold splits
//! the window into ship and flagged sets, the table filters and sorts the
//! result, and one page is returned to the caller.

pub mod candidate_pipeline;
pub mod components;
pub mod filter;
pub mod hydrator;
pub mod order_loader;
pub mod pipelines;
pub mod query_hydrator;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;

pub use candidate_pipeline::{CandidatePipeline, PipelineResult};
pub use pipelines::order_triage::{OrderTriagePipeline, TriageSummary};
pub use types::{OrderCandidate, OrderQuery, OrderView, PaymentMode, ShipDecision, SortDirection, SortKey};
