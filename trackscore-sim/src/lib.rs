pub mod comparison;
pub mod dashboard;
pub mod format;
pub mod generators;
pub mod metrics;
pub mod threshold;
pub mod tuning;

pub use comparison::{compute_comparison, ComparisonMetricRow, MetricCell, Trend};
pub use dashboard::{DashboardSnapshot, DashboardState};
pub use generators::{ChartPoint, ChartSeries};
pub use metrics::{compute_metrics, DashboardMetrics};
pub use threshold::Threshold;
pub use tuning::{ScaleBusinessProfit, TuningConfig};
