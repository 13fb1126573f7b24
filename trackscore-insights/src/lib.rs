//! Ask AI answers and playground goals for the TrackScore dashboard.
//!
//! Answers are typed `AiResponse` values: canned for the suggested
//! questions, template-filled for everything else. Asks are async with
//! explicit cancellation. The one persisted object, the playground goal,
//! goes through a small key-value store.

pub mod cancel;
pub mod canned;
pub mod error;
pub mod matcher;
pub mod playground;
pub mod response;
pub mod service;
pub mod store;

pub use cancel::CancellationToken;
pub use error::{InsightError, InsightResult};
pub use matcher::{classify, respond, Intent};
pub use playground::{PlanStep, PlaygroundGoal, PlaygroundRepository, PLAYGROUND_KEY};
pub use response::{validate_response, AiResponse, ImplementationPlan, InsightMetric, ResponseKind};
pub use service::{AskService, AskSession, DEFAULT_LATENCY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
