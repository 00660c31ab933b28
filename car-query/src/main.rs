use std::path::PathBuf;
use std::process::ExitCode;

use car_query::{
    CarQueryClient, CarQueryConfig, CarQueryError, FixtureClient, ParamValue, QueryParams,
};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Query the CarQuery vehicle data API and print the result as JSON.
#[derive(Parser, Debug)]
#[command(name = "car-query", version)]
struct Cli {
    /// API endpoint (defaults to $CAR_QUERY_BASE_URL, then the public API)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (defaults to $CAR_QUERY_TIMEOUT_SECS, then 30)
    #[arg(long)]
    timeout: Option<u64>,

    /// Serve recorded responses from this directory instead of the API
    #[arg(long, conflicts_with_all = ["base_url", "timeout"])]
    fixtures: Option<PathBuf>,

    /// Operation to run
    operation: Operation,

    /// Filters as name=value pairs, e.g. make=ford year=2012
    #[arg(value_parser = parse_filter)]
    filters: Vec<(String, ParamValue)>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Operation {
    Years,
    Makes,
    Models,
    Trims,
    Model,
}

/// Parse `name=value`. The value is sent exactly as written.
fn parse_filter(raw: &str) -> Result<(String, ParamValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))?;

    if name.is_empty() {
        return Err(format!("missing filter name in {raw:?}"));
    }

    Ok((name.to_string(), ParamValue::Text(value.to_string())))
}

fn to_json<T: Serialize>(result: Result<T, CarQueryError>) -> Result<Value, CarQueryError> {
    let payload = result?;
    serde_json::to_value(payload).map_err(|e| CarQueryError::Json {
        message: e.to_string(),
        body: None,
    })
}

macro_rules! dispatch {
    ($client:expr, $operation:expr, $params:expr) => {
        match $operation {
            Operation::Years => to_json($client.years().await),
            Operation::Makes => to_json($client.makes($params).await),
            Operation::Models => to_json($client.models($params).await),
            Operation::Trims => to_json($client.trims($params).await),
            Operation::Model => to_json($client.model($params).await),
        }
    };
}

async fn run(cli: Cli) -> Result<Value, CarQueryError> {
    let params: QueryParams = cli.filters.into_iter().collect();

    if let Some(dir) = cli.fixtures {
        info!(dir = %dir.display(), "serving recorded responses");
        let client = FixtureClient::new(dir)?;
        return dispatch!(client, cli.operation, params);
    }

    let mut config = CarQueryConfig::from_env();
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(secs);
    }

    let client = CarQueryClient::new(config)?;
    dispatch!(client, cli.operation, params)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("car_query=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("failed to render response: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filters() {
        assert_eq!(
            parse_filter("make=ford").unwrap(),
            ("make".to_string(), ParamValue::Text("ford".into()))
        );
        assert_eq!(
            parse_filter("year=2012").unwrap(),
            ("year".to_string(), ParamValue::Text("2012".into()))
        );
        assert_eq!(
            parse_filter("keyword=ford f-350").unwrap(),
            ("keyword".to_string(), ParamValue::Text("ford f-350".into()))
        );
        assert!(parse_filter("make").is_err());
        assert!(parse_filter("=ford").is_err());
    }

    #[test]
    fn numeric_looking_values_are_kept_verbatim() {
        for raw in ["keyword=007", "model=+5", "year=-0", "doors=04"] {
            let (name, value) = parse_filter(raw).unwrap();
            assert_eq!(format!("{name}={value}"), raw);
        }
    }

    #[test]
    fn cli_arguments() {
        let cli = Cli::try_parse_from(["car-query", "trims", "make=ford", "full_results=0"]).unwrap();
        assert!(matches!(cli.operation, Operation::Trims));
        assert_eq!(cli.filters.len(), 2);

        let cli = Cli::try_parse_from(["car-query", "--fixtures", "fx", "years"]).unwrap();
        assert_eq!(cli.fixtures, Some(PathBuf::from("fx")));

        assert!(Cli::try_parse_from(["car-query", "engines"]).is_err());
    }
}
