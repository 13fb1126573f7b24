//! Command-line parsing.

use trackscore_pipeline::types::{OrderView, PaymentMode, SortDirection, SortKey};
use trackscore_sim::Threshold;

pub const USAGE: &str = "\
Usage: trackscore-server <command> [options]

Commands:
  dashboard                  Metric cards and the strategy comparison
  compare                    Strategy comparison table only
  orders                     Orders table split at the threshold
  chart <kind>               cashflow | inventory | delivery | nps | profit
  ask <question...>          Ask AI
  playground                 Show the saved playground goal

Options:
  --threshold N              Quality threshold 0-100 (default: 75)
  --json                     Output as JSON instead of formatted text
  --tuning FILE              JSON file overriding tuning constants
  --verbose                  Log to stderr
  --csv FILE                 orders: load orders from CSV instead of mock data
  --count N                  orders: number of mock orders (default: 156)
  --search TEXT              orders: filter by id, customer, city, pincode, product
  --view all|ship|flagged    orders: which tab to show
  --payment cod|prepaid      orders: payment mode filter
  --sort COL                 orders: id | amount | quality | placed_at | priority
  --asc                      orders: sort ascending
  --top N                    orders: rows per page (default: 20)
  --orders-per-day N         chart cashflow: daily order goal (default: 156)
  --seed N                   chart/ask/orders: pin the random seed
  --latency-ms N             ask: simulated latency (default: 2000)
  --start-playground         ask: save the plan as the playground goal
  --store FILE               ask/playground: storage file (default: trackscore-storage.json)
  --toggle N                 playground: toggle step N (1-based)

Examples:
  trackscore-server dashboard --threshold 60
  trackscore-server orders --view flagged --sort amount --top 10
  trackscore-server ask \"reduce returns for t-shirts\"";

pub const DEFAULT_STORE: &str = "trackscore-storage.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Cashflow,
    Inventory,
    Delivery,
    Nps,
    Profit,
}

impl ChartKind {
    pub fn parse(input: &str) -> Result<Self, String> {
        match input.trim().to_lowercase().as_str() {
            "cashflow" => Ok(ChartKind::Cashflow),
            "inventory" => Ok(ChartKind::Inventory),
            "delivery" => Ok(ChartKind::Delivery),
            "nps" => Ok(ChartKind::Nps),
            "profit" => Ok(ChartKind::Profit),
            other => Err(format!("unknown chart '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dashboard,
    Compare,
    Orders,
    Chart(ChartKind),
    Ask(String),
    Playground,
}

#[derive(Debug, Clone)]
pub struct Cli {
    pub command: Command,
    pub threshold: Threshold,
    pub json: bool,
    pub tuning: Option<String>,
    pub verbose: bool,
    pub csv: Option<String>,
    pub count: Option<usize>,
    pub search: Option<String>,
    pub view: OrderView,
    pub payment: Option<PaymentMode>,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub top: Option<usize>,
    pub orders_per_day: Option<u32>,
    pub seed: Option<u64>,
    pub latency_ms: Option<u64>,
    pub start_playground: bool,
    pub store: String,
    pub toggle: Option<usize>,
}

impl Cli {
    fn new(command: Command) -> Self {
        Self {
            command,
            threshold: Threshold::default(),
            json: false,
            tuning: None,
            verbose: false,
            csv: None,
            count: None,
            search: None,
            view: OrderView::All,
            payment: None,
            sort: SortKey::default(),
            direction: SortDirection::Descending,
            top: None,
            orders_per_day: None,
            seed: None,
            latency_ms: None,
            start_playground: false,
            store: DEFAULT_STORE.to_string(),
            toggle: None,
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = value(args, i, flag)?;
    raw.trim()
        .parse()
        .map_err(|_| format!("{} requires a non-negative integer, got '{}'", flag, raw))
}

/// Parse `args` without the program name.
pub fn parse(args: &[String]) -> Result<Cli, String> {
    let name = args.first().ok_or_else(|| "missing command".to_string())?;
    let mut rest = 1;
    let mut positional: Vec<String> = Vec::new();

    let mut cli = Cli::new(Command::Dashboard);
    while rest < args.len() {
        let i = rest;
        rest += 2;
        match args[i].as_str() {
            "--threshold" => cli.threshold = Threshold::parse(value(args, i, "--threshold")?)?,
            "--tuning" => cli.tuning = Some(value(args, i, "--tuning")?.to_string()),
            "--csv" => cli.csv = Some(value(args, i, "--csv")?.to_string()),
            "--count" => cli.count = Some(number(args, i, "--count")?),
            "--search" => cli.search = Some(value(args, i, "--search")?.to_string()),
            "--view" => cli.view = OrderView::parse(value(args, i, "--view")?)?,
            "--payment" => cli.payment = Some(PaymentMode::parse(value(args, i, "--payment")?)?),
            "--sort" => cli.sort = SortKey::parse(value(args, i, "--sort")?)?,
            "--top" => cli.top = Some(number(args, i, "--top")?),
            "--orders-per-day" => cli.orders_per_day = Some(number(args, i, "--orders-per-day")?),
            "--seed" => cli.seed = Some(number(args, i, "--seed")?),
            "--latency-ms" => cli.latency_ms = Some(number(args, i, "--latency-ms")?),
            "--store" => cli.store = value(args, i, "--store")?.to_string(),
            "--toggle" => {
                let step: usize = number(args, i, "--toggle")?;
                if step == 0 {
                    return Err("--toggle counts steps from 1".to_string());
                }
                cli.toggle = Some(step - 1);
            }
            flag => {
                rest = i + 1;
                match flag {
                    "--json" => cli.json = true,
                    "--verbose" | "-v" => cli.verbose = true,
                    "--asc" => cli.direction = SortDirection::Ascending,
                    "--desc" => cli.direction = SortDirection::Descending,
                    "--start-playground" => cli.start_playground = true,
                    other if other.starts_with("--") => {
                        return Err(format!("Unknown argument: {}", other))
                    }
                    other => positional.push(other.to_string()),
                }
            }
        }
    }

    cli.command = match name.as_str() {
        "dashboard" => Command::Dashboard,
        "compare" => Command::Compare,
        "orders" => Command::Orders,
        "chart" => {
            let kind = positional
                .first()
                .ok_or_else(|| "chart requires a kind".to_string())?;
            Command::Chart(ChartKind::parse(kind)?)
        }
        "ask" => {
            let question = positional.join(" ");
            if question.trim().is_empty() {
                return Err("ask requires a question".to_string());
            }
            Command::Ask(question)
        }
        "playground" => Command::Playground,
        other => return Err(format!("unknown command '{}'", other)),
    };

    let takes_positional = matches!(cli.command, Command::Chart(_) | Command::Ask(_));
    if !takes_positional && !positional.is_empty() {
        return Err(format!("Unknown argument: {}", positional[0]));
    }
    if let Command::Chart(_) = cli.command {
        if positional.len() > 1 {
            return Err(format!("Unknown argument: {}", positional[1]));
        }
    }
    Ok(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn dashboard_defaults() {
        let cli = parse(&args("dashboard")).unwrap();
        assert_eq!(cli.command, Command::Dashboard);
        assert_eq!(cli.threshold.value(), 75);
        assert!(!cli.json);
    }

    #[test]
    fn threshold_is_clamped_and_rounded() {
        assert_eq!(parse(&args("dashboard --threshold 140")).unwrap().threshold.value(), 100);
        assert_eq!(parse(&args("compare --threshold 49.6")).unwrap().threshold.value(), 50);
        assert!(parse(&args("dashboard --threshold abc")).is_err());
    }

    #[test]
    fn orders_flags() {
        let cli = parse(&args(
            "orders --view flagged --payment cod --sort amount --asc --top 5 --search pune --json",
        ))
        .unwrap();
        assert_eq!(cli.view, OrderView::Flagged);
        assert_eq!(cli.payment, Some(PaymentMode::Cod));
        assert_eq!(cli.sort, SortKey::Amount);
        assert_eq!(cli.direction, SortDirection::Ascending);
        assert_eq!(cli.top, Some(5));
        assert_eq!(cli.search.as_deref(), Some("pune"));
        assert!(cli.json);
    }

    #[test]
    fn ask_joins_words() {
        let cli = parse(&args("ask reduce returns --seed 3 for t-shirts")).unwrap();
        assert_eq!(cli.command, Command::Ask("reduce returns for t-shirts".into()));
        assert_eq!(cli.seed, Some(3));
    }

    #[test]
    fn chart_needs_a_kind() {
        assert!(parse(&args("chart")).is_err());
        assert_eq!(
            parse(&args("chart nps --seed 1")).unwrap().command,
            Command::Chart(ChartKind::Nps)
        );
    }

    #[test]
    fn toggle_is_one_based() {
        assert_eq!(parse(&args("playground --toggle 2")).unwrap().toggle, Some(1));
        assert!(parse(&args("playground --toggle 0")).is_err());
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse(&args("dashboard --bogus")).is_err());
        assert!(parse(&args("dashboard extra")).is_err());
        assert!(parse(&args("launch")).is_err());
        assert!(parse(&args("orders --top")).is_err());
    }
}
