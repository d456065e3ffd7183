use autovalue::application::trade_in::TradeInService;
use autovalue::domain::engine::ValuationEngine;
use autovalue::domain::ports::TradeInStoreBox;
use autovalue::domain::valuation::Variant;
use autovalue::domain::vehicle::VehicleDescriptor;
use autovalue::error::ValuationError;
use autovalue::infrastructure::in_memory::InMemoryTradeInStore;
use autovalue::interfaces::csv::valuation_writer::ValuationWriter;
use autovalue::interfaces::csv::vehicle_reader::VehicleReader;
use autovalue::interfaces::json::{self, ValuationResponse};
use chrono::{Datelike, Utc};
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Formal,
    Quick,
}

impl From<VariantArg> for Variant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Formal => Variant::Formal,
            VariantArg::Quick => Variant::Quick,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Vehicles to value: CSV, or JSON when the file ends in `.json`
    input: PathBuf,

    /// Output format written to stdout
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Estimator to run
    #[arg(long, value_enum, default_value_t = VariantArg::Formal)]
    variant: VariantArg,

    /// Reference year for depreciation. Defaults to the current year.
    #[arg(
        long,
        env = "AUTOVALUE_CURRENT_YEAR",
        value_parser = clap::value_parser!(i32).range(1900..=9999)
    )]
    current_year: Option<i32>,

    /// File every valuation as a trade-in application (formal variant only)
    #[arg(long, conflicts_with = "variant")]
    submit: bool,

    /// Path to persistent trade-in database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn open_store(db_path: Option<PathBuf>) -> Result<TradeInStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = autovalue::infrastructure::rocksdb::RocksDBStore::open(path)
                .into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryTradeInStore::new()))
        }
        None => Ok(Box::new(InMemoryTradeInStore::new())),
    }
}

type VehicleStream = Box<dyn Iterator<Item = std::result::Result<VehicleDescriptor, ValuationError>>>;

fn read_vehicles(path: &Path) -> Result<VehicleStream> {
    let file = File::open(path).into_diagnostic()?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let requests = json::read_requests(file).into_diagnostic()?;
        Ok(Box::new(requests.into_iter()))
    } else {
        Ok(Box::new(VehicleReader::new(file).vehicles()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let now = Utc::now();
    let engine = ValuationEngine::new(cli.current_year.unwrap_or_else(|| now.year()));
    let variant = Variant::from(cli.variant);
    let service = TradeInService::new(engine, open_store(cli.db_path)?);

    let stdout = io::stdout();
    let mut csv_writer = ValuationWriter::new(stdout.lock());
    let mut responses = Vec::new();

    for vehicle in read_vehicles(&cli.input)? {
        let vehicle = match vehicle {
            Ok(vehicle) => vehicle,
            Err(e) => {
                eprintln!("Error reading vehicle: {}", e);
                continue;
            }
        };

        let outcome = if cli.submit {
            service
                .submit(vehicle.clone(), "cli", now)
                .await
                .map(ValuationResponse::from)
        } else {
            engine.valuate(&vehicle, variant).map(ValuationResponse::from)
        };

        match outcome {
            Ok(response) => match cli.format {
                Format::Csv => csv_writer
                    .write(&vehicle, &response.valuation)
                    .into_diagnostic()?,
                Format::Json => responses.push(response),
            },
            Err(e) => {
                tracing::warn!(make = %vehicle.make, error = %e, "vehicle rejected");
                eprintln!("Error valuing vehicle: {}", e);
            }
        }
    }

    match cli.format {
        Format::Csv => csv_writer.flush().into_diagnostic()?,
        Format::Json => {
            drop(csv_writer);
            json::write_responses(io::stdout().lock(), &responses).into_diagnostic()?;
            println!();
        }
    }

    if cli.submit {
        let filed = service.into_records().await.into_diagnostic()?;
        tracing::info!(count = filed.len(), "trade-in applications on file");
    }

    Ok(())
}
