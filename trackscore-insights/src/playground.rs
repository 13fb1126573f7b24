//! The playground goal: one implementation plan the seller works through.
//!
//! Stored as a JSON string under [`PLAYGROUND_KEY`]. A new goal overwrites
//! the old one; there is no delete.

use serde::{Deserialize, Serialize};

use crate::error::{InsightError, InsightResult};
use crate::store::KeyValueStore;

/// Storage key of the persisted goal.
pub const PLAYGROUND_KEY: &str = "playgroundGoal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub title: String,
    pub category: String,
    pub done: bool,
    pub details: String,
}

impl PlanStep {
    pub fn new(title: impl Into<String>, category: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            done: false,
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundGoal {
    pub goal: String,
    pub timeframe: String,
    pub steps: Vec<PlanStep>,
}

impl PlaygroundGoal {
    pub fn completed(&self) -> usize {
        self.steps.iter().filter(|s| s.done).count()
    }

    /// Completion as a whole percentage. An empty plan is 0%.
    pub fn progress_percent(&self) -> u32 {
        if self.steps.is_empty() {
            return 0;
        }
        ((self.completed() as f64 / self.steps.len() as f64) * 100.0).round() as u32
    }
}

/// Typed access to the persisted goal.
pub struct PlaygroundRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PlaygroundRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The saved goal, or `None` if nothing was ever started.
    pub fn load(&self) -> InsightResult<Option<PlaygroundGoal>> {
        match self.store.get(PLAYGROUND_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the saved goal.
    pub fn save(&mut self, goal: &PlaygroundGoal) -> InsightResult<()> {
        let raw = serde_json::to_string(goal)?;
        self.store.set(PLAYGROUND_KEY, raw)?;
        log::debug!(
            "saved playground goal '{}' with {} steps",
            goal.goal,
            goal.steps.len()
        );
        Ok(())
    }

    /// Flip the `done` flag of one step and persist. Returns the updated goal,
    /// or `None` when there is no saved goal.
    pub fn toggle_step(&mut self, index: usize) -> InsightResult<Option<PlaygroundGoal>> {
        let Some(mut goal) = self.load()? else {
            return Ok(None);
        };
        let len = goal.steps.len();
        let step = goal
            .steps
            .get_mut(index)
            .ok_or(InsightError::StepOutOfRange { index, len })?;
        step.done = !step.done;
        self.save(&goal)?;
        Ok(Some(goal))
    }
}
