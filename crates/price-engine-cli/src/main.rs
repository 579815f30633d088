use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use price_engine::{best_price_for, resolve_week_and_month, ProductCatalog};

const DEFAULT_CATALOG: &str = "data/catalog.json";

#[derive(Parser)]
#[command(
    name = "best-price",
    version,
    about = "Find the best historical price for an e-commerce product"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the products in the catalog
    Products {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Report the best historical price for a product
    Predict {
        /// Product name as listed by `best-price products`
        product: String,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Directory that dataset and model paths are relative to
        /// (defaults to the catalog's directory)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        #[command(flatten)]
        year: YearArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the ISO week and month for a day of the year
    Week {
        /// 1-based day of the year
        day: u32,

        #[command(flatten)]
        year: YearArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct CatalogArgs {
    /// Product catalog JSON file
    #[arg(long, env = "BEST_PRICE_CATALOG", default_value = DEFAULT_CATALOG)]
    catalog: PathBuf,
}

#[derive(Args)]
struct YearArgs {
    /// Reference year for day-of-year math (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// IANA timezone used to determine the current year
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

impl YearArgs {
    fn resolve(&self) -> Result<i32> {
        if let Some(year) = self.year {
            return Ok(year);
        }
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {}", self.timezone))?;
        let year = Utc::now().with_timezone(&tz).year();
        debug!(timezone = %tz, year, "reference year from system clock");
        Ok(year)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: &Path) -> Result<ProductCatalog> {
    ProductCatalog::load(path)
        .with_context(|| format!("failed to load catalog {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Products { catalog } => {
            let catalog = load_catalog(&catalog.catalog)?;
            for name in catalog.names() {
                println!("{name}");
            }
        }
        Command::Predict {
            product,
            catalog,
            data_dir,
            year,
            json,
        } => {
            let reference_year = year.resolve()?;
            let base_dir = data_dir.unwrap_or_else(|| {
                catalog
                    .catalog
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            });
            let catalog = load_catalog(&catalog.catalog)?;
            let report = best_price_for(&catalog, &product, &base_dir, reference_year)
                .with_context(|| format!("failed to find best price for {product:?}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
        Command::Week { day, year, json } => {
            let reference_year = year.resolve()?;
            let info = resolve_week_and_month(day, reference_year)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Week of the Year: {}", info.week_number);
                println!("Month: {}", info.month_name);
            }
        }
    }

    Ok(())
}
