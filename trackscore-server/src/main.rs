mod args;

use std::env;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;

use trackscore_insights::{
    AiResponse, AskService, AskSession, FileStore, PlaygroundGoal, PlaygroundRepository,
    DEFAULT_LATENCY,
};
use trackscore_pipeline::candidate_pipeline::{CandidatePipeline, PipelineResult};
use trackscore_pipeline::components::mock_order_source::DEFAULT_ORDER_COUNT;
use trackscore_pipeline::order_loader::load_orders_file;
use trackscore_pipeline::pipelines::order_triage::{OrderTriagePipeline, TriageSummary};
use trackscore_pipeline::types::{OrderCandidate, OrderQuery};
use trackscore_sim::format::{format_count, format_rupees};
use trackscore_sim::generators::{
    cashflow, chart_rng, delivery_distribution, inventory_forecast, nps_trend, profit_vs_orders,
    InventoryForecastInput,
};
use trackscore_sim::{
    ChartSeries, ComparisonMetricRow, DashboardSnapshot, DashboardState, MetricCell, Trend,
    TuningConfig,
};

use args::{ChartKind, Cli, Command};

/// Seed of the mock order window, so the table is stable between runs.
const DEFAULT_ORDER_SEED: u64 = 2025;
const RULE_WIDTH: usize = 72;

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DashboardJson<'a> {
    generated_at: String,
    #[serde(flatten)]
    snapshot: &'a DashboardSnapshot,
}

#[derive(Serialize)]
struct OrdersJson<'a> {
    generated_at: String,
    threshold: u8,
    pipeline_ms: u128,
    summary: OrdersSummaryJson,
    orders: &'a [OrderCandidate],
}

#[derive(Serialize)]
struct OrdersSummaryJson {
    total_orders: usize,
    orders_to_ship: usize,
    flagged_orders: usize,
    matched: usize,
    filtered_out: usize,
    shown: usize,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {}", e))
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_banner(title: &str) {
    let inner = RULE_WIDTH - 2;
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(inner));
    println!("  \u{2551}{:^inner$}\u{2551}", title, inner = inner);
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(inner));
    println!();
}

fn print_rule() {
    println!("  {}", "\u{2500}".repeat(RULE_WIDTH));
}

fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "\u{2191}",
        Trend::Down => "\u{2193}",
        Trend::Neutral => " ",
    }
}

fn cell(cell: &MetricCell) -> String {
    let marker = if cell.highlight { "*" } else { " " };
    format!("{}{} {}", marker, cell.value, trend_arrow(cell.trend))
}

fn print_comparison(rows: &[ComparisonMetricRow]) {
    println!(
        "  {:<20} {:>15} {:>17} {:>15}",
        "Metric", "Ship All", "Scale Business", "TrackScore"
    );
    print_rule();
    for row in rows {
        println!(
            "  {:<20} {:>15} {:>17} {:>15}",
            row.metric,
            cell(&row.shipping_all),
            cell(&row.scaling_business),
            cell(&row.shipping_less)
        );
        println!("  {:<20} {}", "", row.description);
    }
    print_rule();
    println!("  * best in row");
}

fn print_dashboard(state: &DashboardState) {
    let m = state.metrics();
    print_banner(&format!("TRACKSCORE \u{00b7} Threshold {}", state.threshold()));
    println!("  Total Orders      {:>8}", format_count(f64::from(m.total_orders)));
    println!("  Flagged Orders    {:>8}", format_count(f64::from(m.flagged_orders)));
    println!("  Orders to Ship    {:>8}", format_count(f64::from(m.orders_to_ship)));
    println!(
        "  Delivery Rate     {:>7}%   (was {}%)",
        m.delivery_rate, m.previous_delivery_rate
    );
    if m.show_warning {
        println!();
        println!("  \u{26a0}  Threshold below 50 ships few orders; volume will drop sharply.");
    }
    println!();
    print_comparison(state.comparison());
    println!();
}

fn print_orders(result: &PipelineResult<OrderQuery, OrderCandidate>, pipeline_ms: u128) {
    let summary = TriageSummary::from_orders(&result.retrieved_candidates);
    let query = &result.query;
    print_banner(&format!("ORDERS \u{00b7} Threshold {}", query.threshold));
    println!(
        "  {} orders  \u{00b7}  {} to ship  \u{00b7}  {} flagged",
        summary.total, summary.ship, summary.flagged
    );
    println!(
        "  {} matched ({} filtered out)  \u{00b7}  showing {}",
        result.retrieved_candidates.len() - result.filtered_candidates.len(),
        result.filtered_candidates.len(),
        result.selected_candidates.len()
    );
    println!();

    if result.selected_candidates.is_empty() {
        println!("  No orders match.");
    } else {
        println!(
            "  {:<9} {:<15} {:<10} {:<18} {:>9} {:<7} {:>5} {:<6} {:>7}  {}",
            "Order", "Customer", "City", "Product", "Amount", "Pay", "Score", "Risk", "Prio", "Decision"
        );
        print_rule();
        for c in &result.selected_candidates {
            let risk = c.risk_band.map(|b| b.to_string()).unwrap_or_default();
            println!(
                "  {:<9} {:<15} {:<10} {:<18} {:>9} {:<7} {:>5.1} {:<6} {:>7.1}  {}",
                c.id,
                c.customer,
                c.city,
                c.product,
                format_rupees(c.amount),
                c.payment_mode.to_string(),
                c.quality_score,
                risk,
                c.priority_score.unwrap_or(0.0),
                c.decision
            );
        }
        print_rule();
    }
    println!();
    println!("  \u{23f1}  Pipeline ran in {}ms", pipeline_ms);
    println!();
}

fn print_chart(chart: &ChartSeries) {
    print_banner(&chart.title.to_uppercase());
    println!(
        "  {:<10} {:>16} {:>16}",
        "", chart.series_a_name, chart.series_b_name
    );
    print_rule();
    for p in &chart.points {
        println!("  {:<10} {:>16.1} {:>16.1}", p.label, p.series_a, p.series_b);
    }
    println!();
}

fn print_answer(answer: &AiResponse) {
    print_banner(&answer.title);
    if !answer.summary.is_empty() {
        println!("  {}", answer.summary);
        println!();
    }
    for metric in &answer.metrics {
        match &metric.change {
            Some(change) => println!("  {:<28} {:>12}  ({})", metric.label, metric.value, change),
            None => println!("  {:<28} {:>12}", metric.label, metric.value),
        }
    }
    if !answer.action_items.is_empty() {
        println!();
        for (i, item) in answer.action_items.iter().enumerate() {
            println!("  {}. {}", i + 1, item);
        }
    }
    if let Some(chart) = &answer.chart {
        print_chart(chart);
    }
    if let Some(plan) = &answer.plan {
        println!();
        println!("  Plan: {} ({})", plan.goal, plan.timeframe);
        println!("  Run again with --start-playground to track it.");
    }
    println!();
}

fn print_goal(goal: &PlaygroundGoal) {
    print_banner("PLAYGROUND");
    println!("  {}  \u{00b7}  {}", goal.goal, goal.timeframe);
    println!(
        "  {}/{} steps done ({}%)",
        goal.completed(),
        goal.steps.len(),
        goal.progress_percent()
    );
    println!();
    for (i, step) in goal.steps.iter().enumerate() {
        let mark = if step.done { "x" } else { " " };
        println!("  [{}] {}. {}  ({})", mark, i + 1, step.title, step.category);
        println!("         {}", step.details);
    }
    println!();
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run_dashboard(cli: &Cli, tuning: TuningConfig, comparison_only: bool) -> Result<(), String> {
    let state = DashboardState::with_threshold(tuning, cli.threshold);
    log::debug!(
        "dashboard threshold={} to_ship={}",
        cli.threshold,
        state.metrics().orders_to_ship
    );

    if cli.json {
        let snapshot = state.snapshot();
        if comparison_only {
            println!("{}", to_json(&snapshot.comparison)?);
        } else {
            println!(
                "{}",
                to_json(&DashboardJson {
                    generated_at: Utc::now().to_rfc3339(),
                    snapshot: &snapshot,
                })?
            );
        }
    } else if comparison_only {
        print_banner(&format!("STRATEGY COMPARISON \u{00b7} Threshold {}", cli.threshold));
        print_comparison(state.comparison());
        println!();
    } else {
        print_dashboard(&state);
    }
    Ok(())
}

async fn run_orders(cli: &Cli) -> Result<(), String> {
    let pipeline = match &cli.csv {
        Some(path) => {
            let orders = load_orders_file(path)?;
            log::info!("loaded {} orders from {}", orders.len(), path);
            OrderTriagePipeline::with_orders(orders)
        }
        None => OrderTriagePipeline::with_mock_orders(
            cli.count.unwrap_or(DEFAULT_ORDER_COUNT),
            cli.seed.unwrap_or(DEFAULT_ORDER_SEED),
        ),
    };

    let mut query = OrderQuery::new("orders-001", cli.threshold);
    query.search = cli.search.clone();
    query.view = cli.view;
    query.payment_mode = cli.payment;
    query.sort = cli.sort;
    query.direction = cli.direction;
    query.page_size = cli.top;

    let start = Instant::now();
    let mut result = pipeline.execute(query).await;
    let pipeline_ms = start.elapsed().as_millis();
    result.settle_side_effects().await;

    if cli.json {
        let summary = TriageSummary::from_orders(&result.retrieved_candidates);
        let out = OrdersJson {
            generated_at: Utc::now().to_rfc3339(),
            threshold: result.query.threshold.value(),
            pipeline_ms,
            summary: OrdersSummaryJson {
                total_orders: summary.total,
                orders_to_ship: summary.ship,
                flagged_orders: summary.flagged,
                matched: result.retrieved_candidates.len() - result.filtered_candidates.len(),
                filtered_out: result.filtered_candidates.len(),
                shown: result.selected_candidates.len(),
            },
            orders: &result.selected_candidates,
        };
        println!("{}", to_json(&out)?);
    } else {
        print_orders(&result, pipeline_ms);
    }
    Ok(())
}

fn run_chart(cli: &Cli, kind: ChartKind, tuning: &TuningConfig) -> Result<(), String> {
    let mut rng = chart_rng(cli.seed);
    let chart = match kind {
        ChartKind::Cashflow => cashflow(
            cli.orders_per_day.unwrap_or(tuning.metrics.total_orders),
            &mut rng,
        ),
        ChartKind::Inventory => inventory_forecast(&InventoryForecastInput::default(), &mut rng),
        ChartKind::Delivery => delivery_distribution(cli.threshold, tuning.metrics.total_orders),
        ChartKind::Nps => nps_trend(&mut rng),
        ChartKind::Profit => profit_vs_orders(tuning),
    };

    if cli.json {
        println!("{}", to_json(&chart)?);
    } else {
        print_chart(&chart);
    }
    Ok(())
}

async fn run_ask(cli: &Cli, question: &str) -> Result<(), String> {
    let latency = cli
        .latency_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_LATENCY);
    let service = match cli.seed {
        Some(seed) => AskService::seeded(latency, seed),
        None => AskService::with_latency(latency),
    };
    let session = AskSession::new(Arc::new(service));

    if !cli.json {
        println!("  Thinking...");
    }
    let answer = session.submit(question).await.map_err(|e| e.to_string())?;

    if cli.json {
        println!("{}", to_json(&answer)?);
    } else {
        print_answer(&answer);
    }

    if cli.start_playground {
        let plan = answer
            .plan
            .as_ref()
            .ok_or_else(|| "this answer has no plan to start; ask for an implementation plan".to_string())?;
        let mut repo = PlaygroundRepository::new(FileStore::new(&cli.store));
        repo.save(&plan.to_playground_goal())
            .map_err(|e| e.to_string())?;
        eprintln!("Saved playground goal to {}", cli.store);
    }
    Ok(())
}

fn run_playground(cli: &Cli) -> Result<(), String> {
    let mut repo = PlaygroundRepository::new(FileStore::new(&cli.store));
    let goal = match cli.toggle {
        Some(step) => repo.toggle_step(step),
        None => repo.load(),
    }
    .map_err(|e| e.to_string())?;

    match goal {
        Some(goal) if cli.json => println!("{}", to_json(&goal)?),
        Some(goal) => print_goal(&goal),
        None if cli.json => println!("null"),
        None => {
            println!("No playground goal yet. Ask for an implementation plan with --start-playground.")
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), String> {
    let tuning = match &cli.tuning {
        Some(path) => TuningConfig::load_file(path)?,
        None => TuningConfig::default(),
    };

    match cli.command.clone() {
        Command::Dashboard => run_dashboard(&cli, tuning, false),
        Command::Compare => run_dashboard(&cli, tuning, true),
        Command::Orders => run_orders(&cli).await,
        Command::Chart(kind) => run_chart(&cli, kind, &tuning),
        Command::Ask(question) => run_ask(&cli, &question).await,
        Command::Playground => run_playground(&cli),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

/// Stderr logging for the `log` records the library crates emit. Quiet
/// (warnings only) unless `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let _ = fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() {
    let raw: Vec<String> = env::args().skip(1).collect();
    if raw.is_empty() || matches!(raw[0].as_str(), "-h" | "--help" | "help") {
        eprintln!("{}", args::USAGE);
        process::exit(if raw.is_empty() { 1 } else { 0 });
    }

    let cli = match args::parse(&raw) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", args::USAGE);
            process::exit(1);
        }
    };
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_enabled(level: log::Level) -> bool {
        log::logger().enabled(&log::Metadata::builder().level(level).target("trackscore").build())
    }

    #[test]
    fn verbose_logging_reaches_debug_records() {
        init_logging(true);
        assert!(log_enabled(log::Level::Warn));
        assert!(log_enabled(log::Level::Debug));
        assert!(!log_enabled(log::Level::Trace));
        // A second install is ignored rather than panicking.
        init_logging(false);
    }
}
