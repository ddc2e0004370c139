use std::io::Read;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use setaside::config::{Config, LogFormat};
use setaside::core::CurrencyCode;
use setaside::orders::{OrderPayload, OrderTaxService};
use setaside::reports::ReportService;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str =
    "usage: setaside [ORDERS_JSON | -] [--start YYYY-MM-DD] [--end YYYY-MM-DD] [--currency CODE]";

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    currency: Option<CurrencyCode>,
}

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config);

    let args = parse_args(std::env::args().skip(1))?;

    tracing::info!("Starting SetAside tax breakdown");
    tracing::info!("Environment: {}", config.app.env);
    tracing::debug!("Default currency: {}", config.app.default_currency);

    let input = read_input(args.input.as_deref())?;
    let orders = OrderPayload::many_from_json(&input).context("Failed to decode order JSON")?;

    let service = OrderTaxService::with_default_currency(config.app.default_currency.clone());
    let records = service.process_all(&orders);

    let reports = ReportService::new().generate(
        &records,
        args.start_date,
        args.end_date,
        args.currency.as_ref(),
    )?;

    let output = serde_json::json!({
        "orders": records,
        "reports": reports,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

// Logs go to stderr so stdout carries only the JSON result.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args::default();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--start" | "--end" | "--currency" => {
                let value = raw
                    .next()
                    .with_context(|| format!("{} needs a value\n{}", arg, USAGE))?;
                match arg.as_str() {
                    "--start" => args.start_date = Some(parse_date(&value)?),
                    "--end" => args.end_date = Some(parse_date(&value)?),
                    _ => {
                        args.currency = Some(value.parse().map_err(anyhow::Error::msg)?);
                    }
                }
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ if args.input.is_none() => args.input = Some(arg),
            _ => bail!("unexpected argument: {}\n{}", arg, USAGE),
        }
    }

    Ok(args)
}

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {} (expected YYYY-MM-DD)", value))
}

fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read orders from stdin")?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read orders from {}", path)),
    }
}
