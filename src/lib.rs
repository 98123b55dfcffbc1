pub mod cli;
pub mod filter;
pub mod query;
pub mod request;
pub mod wire;

use anyhow::Context;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Commands, cli_parse};
pub use filter::{
    Combine, CompositeFilter, DateFilter, DatePrecision, EmptyValueFilter, Filter, FilterError,
    LogicalOperator, MatchType, MultiValueFilter, NotEmptyValueFilter, SortOrder, StringFilter,
    WireEnum,
};
pub use query::{QueryDefinition, QueryError, load_query_from_path};
pub use request::{LoanPipelineRequest, SortCriterion};

/// Log level used when `RUST_LOG` is not set
fn default_log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber so stdout carries only JSON
fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn token_line<T: WireEnum>() -> String {
    let tokens: Vec<String> = T::members().iter().map(|m| m.as_token()).collect();
    format!("{}: {}", T::KIND, tokens.join(", "))
}

/// Wire tokens of every enumeration, one enumeration per line
pub fn token_listing() -> String {
    [
        token_line::<MatchType>(),
        token_line::<LogicalOperator>(),
        token_line::<DatePrecision>(),
        token_line::<SortOrder>(),
    ]
    .join("\n")
}

fn write_output_file(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

/// A query file rendered to its request body
#[derive(Debug, Clone)]
pub struct RenderedQuery {
    pub json: String,
    /// Canonical names of date terms whose hour/minute precision was sent
    /// with a day-formatted value
    pub day_formatted: Vec<String>,
}

/// Load a query file, build its request and render the JSON body, writing it
/// to `output` as well when given
pub fn render_query(
    file: &Path,
    pretty: bool,
    output: Option<&Path>,
) -> anyhow::Result<RenderedQuery> {
    let definition = load_query_from_path(file)?;
    let request = definition
        .to_request()
        .with_context(|| format!("Failed to build request from '{}'", file.display()))?;

    let day_formatted: Vec<String> = request
        .filter()
        .map(unguarded_date_precisions)
        .unwrap_or_default()
        .into_iter()
        .map(str::to_string)
        .collect();
    for name in &day_formatted {
        tracing::warn!(
            canonical_name = %name,
            "Date precision finer than a day is sent with a day-formatted value"
        );
    }

    let json = request.to_json(pretty)?;
    if let Some(path) = output {
        write_output_file(path, &json)?;
        tracing::info!(path = %path.display(), "Request written");
    }

    Ok(RenderedQuery {
        json,
        day_formatted,
    })
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Commands::Render {
            file,
            pretty,
            output,
        } => {
            let rendered = render_query(file, *pretty, output.as_deref())?;
            println!("{}", rendered.json);
        }
        Commands::Tokens => {
            println!("{}", token_listing());
        }
    }

    Ok(())
}

/// Canonical names of date filters whose precision is hour or minute
fn unguarded_date_precisions(filter: &Filter) -> Vec<&str> {
    match filter {
        Filter::Date(date)
            if matches!(date.precision(), DatePrecision::Hour | DatePrecision::Minute) =>
        {
            vec![date.canonical_name()]
        }
        Filter::Composite(composite) => composite
            .terms()
            .iter()
            .flat_map(unguarded_date_precisions)
            .collect(),
        _ => Vec::new(),
    }
}
