use clap::Args;
use focusplan_core::{plan_with_timeout, Config, ScheduleRequest};
use std::io::Read;
use std::time::Duration;

#[derive(Args)]
pub struct PlanArgs {
    /// Request JSON file ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    input: String,
    /// Target date (YYYY-MM-DD), overrides the request
    #[arg(long)]
    date: Option<String>,
    /// Time-zone label, overrides the request
    #[arg(long)]
    timezone: Option<String>,
    /// Planning deadline in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(&args.input)?;
    let mut request: ScheduleRequest = serde_json::from_str(&raw)?;

    if args.date.is_some() {
        request.target_date = args.date;
    }
    if args.timezone.is_some() {
        request.timezone = args.timezone;
    }

    let config = Config::load_or_default();
    config.apply_defaults(&mut request);
    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(config.planner.timeout_ms));

    let runtime = tokio::runtime::Runtime::new()?;
    let schedule = runtime.block_on(plan_with_timeout(request, timeout));
    // An expired worker must not hold the process open
    runtime.shutdown_background();

    let json = if args.compact || !config.planner.pretty_output {
        serde_json::to_string(&schedule)?
    } else {
        serde_json::to_string_pretty(&schedule)?
    };
    println!("{json}");
    Ok(())
}
