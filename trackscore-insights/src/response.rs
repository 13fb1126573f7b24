//! Structured Ask-AI answers.
//!
//! Answers are typed values, never free text, so the renderer and the
//! playground can consume them directly. `validate_response` checks the
//! shape each kind promises before an answer leaves the service.

use serde::{Deserialize, Serialize};
use trackscore_sim::ChartSeries;

use crate::playground::{PlanStep, PlaygroundGoal};

/// Metrics shown on a generic answer card.
pub const GENERIC_METRIC_COUNT: usize = 3;
/// Action items listed on a generic answer card.
pub const GENERIC_ACTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// One of the hand-written answers.
    Canned,
    ImplementationPlan,
    Graph,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightMetric {
    pub label: String,
    pub value: String,
    /// Change versus today, e.g. "+12%".
    pub change: Option<String>,
}

impl InsightMetric {
    pub fn new(label: impl Into<String>, value: impl Into<String>, change: Option<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            change,
        }
    }
}

/// A step-by-step plan the seller can move into the playground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationPlan {
    pub goal: String,
    pub timeframe: String,
    pub steps: Vec<PlanStep>,
}

impl ImplementationPlan {
    /// "Start in Playground": a fresh goal with every step open.
    pub fn to_playground_goal(&self) -> PlaygroundGoal {
        PlaygroundGoal {
            goal: self.goal.clone(),
            timeframe: self.timeframe.clone(),
            steps: self
                .steps
                .iter()
                .map(|s| PlanStep {
                    done: false,
                    ..s.clone()
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    pub id: String,
    pub kind: ResponseKind,
    pub query: String,
    pub title: String,
    pub summary: String,
    pub metrics: Vec<InsightMetric>,
    pub action_items: Vec<String>,
    pub plan: Option<ImplementationPlan>,
    pub chart: Option<ChartSeries>,
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub rule: &'static str,
    pub detail: String,
}

/// Check that an answer carries what its kind promises.
pub fn validate_response(response: &AiResponse) -> ValidationResult {
    let mut violations = Vec::new();
    let mut reject = |rule: &'static str, detail: String| violations.push(Violation { rule, detail });

    if response.title.trim().is_empty() {
        reject("TITLE_REQUIRED", "answer has no title".into());
    }
    if response.action_items.iter().any(|a| a.trim().is_empty()) {
        reject("EMPTY_ACTION", "action items must not be blank".into());
    }

    match response.kind {
        ResponseKind::Generic => {
            if response.metrics.len() != GENERIC_METRIC_COUNT {
                reject(
                    "GENERIC_METRICS",
                    format!(
                        "generic answer has {} metrics, expected {}",
                        response.metrics.len(),
                        GENERIC_METRIC_COUNT
                    ),
                );
            }
            if response.action_items.len() != GENERIC_ACTION_COUNT {
                reject(
                    "GENERIC_ACTIONS",
                    format!(
                        "generic answer has {} action items, expected {}",
                        response.action_items.len(),
                        GENERIC_ACTION_COUNT
                    ),
                );
            }
        }
        ResponseKind::ImplementationPlan => match &response.plan {
            Some(plan) if !plan.steps.is_empty() => {}
            Some(_) => reject("PLAN_STEPS", "plan has no steps".into()),
            None => reject("PLAN_REQUIRED", "implementation answer has no plan".into()),
        },
        ResponseKind::Graph => match &response.chart {
            Some(chart) if !chart.points.is_empty() => {}
            Some(_) => reject("CHART_POINTS", "chart has no points".into()),
            None => reject("CHART_REQUIRED", "graph answer has no chart".into()),
        },
        ResponseKind::Canned => {}
    }

    ValidationResult {
        valid: violations.is_empty(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic() -> AiResponse {
        AiResponse {
            id: "generic-1".into(),
            kind: ResponseKind::Generic,
            query: "anything".into(),
            title: "Here is what we found".into(),
            summary: String::new(),
            metrics: (0..3)
                .map(|i| InsightMetric::new(format!("m{}", i), "1", None))
                .collect(),
            action_items: (0..5).map(|i| format!("do {}", i)).collect(),
            plan: None,
            chart: None,
        }
    }

    #[test]
    fn well_formed_generic_passes() {
        assert!(validate_response(&generic()).valid);
    }

    #[test]
    fn generic_with_wrong_counts_is_rejected() {
        let mut r = generic();
        r.metrics.pop();
        r.action_items.push("extra".into());
        let result = validate_response(&r);
        let rules: Vec<&str> = result.violations.iter().map(|v| v.rule).collect();
        assert_eq!(rules, vec!["GENERIC_METRICS", "GENERIC_ACTIONS"]);
    }

    #[test]
    fn plan_kind_requires_steps() {
        let mut r = generic();
        r.kind = ResponseKind::ImplementationPlan;
        assert!(!validate_response(&r).valid);
        r.plan = Some(ImplementationPlan {
            goal: "g".into(),
            timeframe: "3 months".into(),
            steps: vec![PlanStep::new("a", "b", "c")],
        });
        assert!(validate_response(&r).valid);
    }

    #[test]
    fn playground_goal_starts_with_open_steps() {
        let mut step = PlanStep::new("a", "Operations", "c");
        step.done = true;
        let plan = ImplementationPlan {
            goal: "g".into(),
            timeframe: "3 months".into(),
            steps: vec![step],
        };
        let goal = plan.to_playground_goal();
        assert!(!goal.steps[0].done);
        assert_eq!(goal.goal, "g");
    }
}
