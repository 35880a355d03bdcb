use serde::Serialize;
use tokio::runtime::Runtime;

use crate::crew::lineup_report;
use crate::data::{load_roster, load_voyage};
use crate::report::estimate_report;
use crate::server;
use crate::settings::Settings;
use crate::stats::{chart_series, export_series};
use crate::voyage::{load_result, ExpectedValueEngine, SimulationGateway};

const USAGE: &str = "usage: voyage_estimator <serve|estimate|chart|recommend>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Estimate,
    Chart,
    Recommend,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("estimate") => Some(Command::Estimate),
        Some("chart") => Some(Command::Chart),
        Some("recommend") => Some(Command::Recommend),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Estimate) => handle_estimate(args),
        Some(Command::Chart) => handle_chart(args),
        Some(Command::Recommend) => handle_recommend(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn runtime() -> Option<Runtime> {
    match Runtime::new() {
        Ok(runtime) => Some(runtime),
        Err(err) => {
            eprintln!("failed to start async runtime: {err}");
            None
        }
    }
}

fn handle_serve() -> i32 {
    let settings = Settings::from_env();
    let Some(runtime) = runtime() else {
        return 1;
    };
    match runtime.block_on(server::run_server(settings)) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EstimateArgs {
    voyage_path: String,
    sims: Option<String>,
    deterministic: bool,
    csv_path: Option<String>,
}

fn parse_estimate_args(args: &[String]) -> Option<EstimateArgs> {
    let voyage_path = args.get(2).filter(|a| !a.starts_with("--"))?.clone();
    let mut parsed = EstimateArgs {
        voyage_path,
        sims: None,
        deterministic: false,
        csv_path: None,
    };
    let mut rest = args.iter().skip(3);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--deterministic" => parsed.deterministic = true,
            "--csv" => parsed.csv_path = Some(rest.next()?.clone()),
            flag if flag.starts_with("--") => return None,
            value if parsed.sims.is_none() => parsed.sims = Some(value.to_string()),
            _ => return None,
        }
    }
    Some(parsed)
}

fn handle_estimate(args: &[String]) -> i32 {
    let Some(parsed) = parse_estimate_args(args) else {
        eprintln!("usage: voyage_estimator estimate <voyage.json> [sims] [--deterministic] [--csv <path>]");
        return 2;
    };
    let settings = Settings::from_env();
    let sims = parse_u32_arg(parsed.sims.as_ref(), "sims", settings.default_simulations);
    if !(1..=settings.max_simulations).contains(&sims) {
        eprintln!("sims must be between 1 and {}", settings.max_simulations);
        return 2;
    }

    let voyage = match load_voyage(&parsed.voyage_path) {
        Ok(voyage) => voyage,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let Some(runtime) = runtime() else {
        return 1;
    };
    let handle = runtime.handle().clone();
    let gateway = if parsed.deterministic {
        SimulationGateway::on_runtime(ExpectedValueEngine, handle)
    } else {
        SimulationGateway::on_runtime(settings.monte_carlo_engine(None), handle)
    };
    let report = match runtime.block_on(estimate_report(&gateway, &voyage, Some(sims), None)) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("estimate failed: {err}");
            return 1;
        }
    };
    if !report.is_complete() {
        eprintln!("estimate failed: simulation ended without a result");
        return 1;
    }

    if let Some(path) = &parsed.csv_path {
        if let Err(err) = export_series(path, &report.chart) {
            eprintln!("{err}");
            return 1;
        }
    }
    print_json(&report, "estimate report")
}

fn handle_chart(args: &[String]) -> i32 {
    let Some(path) = args.get(2).filter(|a| !a.starts_with("--")) else {
        eprintln!("usage: voyage_estimator chart <result.json> [--revive]");
        return 2;
    };
    let needs_revive = args.iter().skip(3).any(|arg| arg == "--revive");

    match load_result(path) {
        Ok(result) => print_json(&chart_series(&result, needs_revive), "chart series"),
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn handle_recommend(args: &[String]) -> i32 {
    let (Some(voyage_path), Some(roster_path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: voyage_estimator recommend <voyage.json> <roster.json>");
        return 2;
    };

    let loaded = load_voyage(voyage_path).and_then(|voyage| Ok((voyage, load_roster(roster_path)?)));
    match loaded {
        Ok((voyage, roster)) => print_json(&lineup_report(&voyage, &roster), "lineup"),
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn print_json<T: Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
