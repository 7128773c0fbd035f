use std::env;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, error::ErrorKind};

use crate::config::{EngineConfig, FilterSpec};
use crate::constants::dataset::{DATA_PATH_ENV, DEFAULT_DATA_PATH};
use crate::data::Dataset;
use crate::errors::QueryError;
use crate::query::{Query, QueryEngine};
use crate::source::{CsvSource, DatasetSource};
use crate::store;

#[derive(Debug, Parser)]
#[command(
    name = "housing_query",
    disable_help_subcommand = true,
    about = "Query housing sale statistics",
    long_about = "Run summary, trend, distribution, scatter, or bedroom queries over a housing sales CSV and print the result as JSON.",
    after_help = "The dataset path is resolved in order by --data, the HOUSING_DATA_PATH environment variable, then data/houses.csv."
)]
/// CLI for `housing_query`.
///
/// Common usage:
/// - `housing_query summary --min-price 500000`
/// - `housing_query trends --start-year 2014 --end-year 2015 --start-month 1 --end-month 6`
/// - `housing_query --data /tmp/houses.csv scatter --min-sqft 1000 --max-sqft 3000`
struct QueryCli {
    #[arg(
        long = "data",
        value_name = "PATH",
        global = true,
        help = "Optional dataset CSV path override"
    )]
    data: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Optional deterministic seed override for sampled queries"
    )]
    seed: Option<u64>,
    #[command(subcommand)]
    command: QueryCommand,
}

#[derive(Debug, Subcommand)]
enum QueryCommand {
    /// Mean price, median living area, and sale count.
    Summary(FilterArgs),
    /// Per-month price and size statistics.
    Trends(FilterArgs),
    /// Sampled living-area values.
    SizeDistribution(SqftRangeArgs),
    /// Sampled sale prices.
    PriceDistribution(PriceRangeArgs),
    /// Sampled price/size points with bedroom category.
    Scatter {
        #[command(flatten)]
        sqft: SqftRangeArgs,
        #[command(flatten)]
        price: PriceRangeArgs,
    },
    /// Sale counts per bedroom category.
    Bedrooms {
        #[command(flatten)]
        price: PriceRangeArgs,
        #[arg(long = "bedroom-category", help = "Exact bedroom category")]
        bedroom_category: Option<String>,
    },
}

#[derive(Debug, Args)]
struct PriceRangeArgs {
    #[arg(long = "min-price", help = "Inclusive lower price bound")]
    min_price: Option<f64>,
    #[arg(long = "max-price", help = "Inclusive upper price bound")]
    max_price: Option<f64>,
}

#[derive(Debug, Args)]
struct SqftRangeArgs {
    #[arg(long = "min-sqft", help = "Inclusive lower living-area bound")]
    min_sqft: Option<f64>,
    #[arg(long = "max-sqft", help = "Inclusive upper living-area bound")]
    max_sqft: Option<f64>,
}

#[derive(Debug, Args)]
struct FilterArgs {
    #[command(flatten)]
    price: PriceRangeArgs,
    #[command(flatten)]
    sqft: SqftRangeArgs,
    #[arg(long = "bedroom-category", help = "Exact bedroom category")]
    bedroom_category: Option<String>,
    #[arg(long = "start-year", help = "Inclusive first sale year")]
    start_year: Option<i32>,
    #[arg(long = "end-year", help = "Inclusive last sale year")]
    end_year: Option<i32>,
    #[arg(long = "start-month", help = "Inclusive first sale month")]
    start_month: Option<u32>,
    #[arg(long = "end-month", help = "Inclusive last sale month")]
    end_month: Option<u32>,
}

impl From<FilterArgs> for FilterSpec {
    fn from(args: FilterArgs) -> Self {
        FilterSpec {
            bedroom_category: args.bedroom_category,
            ..FilterSpec::default()
                .with_price_range(args.price.min_price, args.price.max_price)
                .with_sqft_range(args.sqft.min_sqft, args.sqft.max_sqft)
                .with_year_range(args.start_year, args.end_year)
                .with_month_range(args.start_month, args.end_month)
        }
    }
}

impl From<QueryCommand> for Query {
    fn from(command: QueryCommand) -> Self {
        match command {
            QueryCommand::Summary(filters) => Query::Summary(filters.into()),
            QueryCommand::Trends(filters) => Query::Trends(filters.into()),
            QueryCommand::SizeDistribution(sqft) => Query::SizeDistribution {
                min_sqft: sqft.min_sqft,
                max_sqft: sqft.max_sqft,
            },
            QueryCommand::PriceDistribution(price) => Query::PriceDistribution {
                min_price: price.min_price,
                max_price: price.max_price,
            },
            QueryCommand::Scatter { sqft, price } => Query::Scatter {
                min_sqft: sqft.min_sqft,
                max_sqft: sqft.max_sqft,
                min_price: price.min_price,
                max_price: price.max_price,
            },
            QueryCommand::Bedrooms {
                price,
                bedroom_category,
            } => Query::BedroomDistribution {
                min_price: price.min_price,
                max_price: price.max_price,
                bedroom_category,
            },
        }
    }
}

/// Parse `args_iter`, load the dataset through `load_dataset`, run one query, and write
/// the JSON result to `out`.
///
/// `args_iter` excludes the program name. `--help`/`--version` print and return `Ok`.
pub fn run_query_cli<I, Load, W>(
    args_iter: I,
    load_dataset: Load,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
    Load: FnOnce(&Path) -> Result<Arc<Dataset>, QueryError>,
    W: Write,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let Some(cli) =
        parse_cli::<QueryCli, _>(std::iter::once("housing_query".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let data_path = resolve_data_path(cli.data);
    let dataset = load_dataset(&data_path)?;

    let mut config = EngineConfig::default();
    config.seed = cli.seed.unwrap_or(config.seed);
    let engine = QueryEngine::with_config(dataset, config);

    let result = engine.execute(&cli.command.into());
    serde_json::to_writer_pretty(&mut *out, &result)?;
    writeln!(out)?;
    Ok(())
}

/// Load `path` as CSV and install it as the process-wide snapshot.
pub fn load_snapshot(path: &Path) -> Result<Arc<Dataset>, QueryError> {
    store::install_from(&CsvSource::new(path))
}

/// Load `path` as CSV without touching the process-wide snapshot.
pub fn load_detached(path: &Path) -> Result<Arc<Dataset>, QueryError> {
    CsvSource::new(path).load().map(Arc::new)
}

/// Resolve the dataset path: explicit arg, then `HOUSING_DATA_PATH`, then the project default.
pub fn resolve_data_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var_os(DATA_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
