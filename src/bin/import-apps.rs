//! Catalog bulk import tool
//!
//! One-shot seeding of the app catalog from a Play Store CSV export.
//! Rows are keyed by a package-name column and written in batches;
//! the store-style install count (`"1,000,000,000+"`) is normalized
//! into an integer column along the way.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use playcat::config::DatabaseConfig;
use playcat::storage::{Catalog, ImportRecord};
use playcat::utils::error::ServiceError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Seed the app catalog from a store CSV export
#[derive(Debug, Parser)]
#[command(name = "import-apps", version, about)]
struct Args {
    /// CSV file to import
    csv_path: PathBuf,

    /// Database URL (sqlite or postgres)
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://playcat.db?mode=rwc"
    )]
    database_url: String,

    /// Column holding the package name
    #[arg(long, default_value = "id")]
    id_column: String,

    /// Rows per upsert statement
    #[arg(long, default_value_t = 499)]
    batch_size: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(total) => {
            info!("Import finished: {} rows written", total);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> playcat::Result<u64> {
    let config = DatabaseConfig {
        url: args.database_url.clone(),
        ..Default::default()
    };
    let catalog = Catalog::new(&config).await?;
    catalog.migrate().await?;

    info!(
        "Reading '{}' into the catalog...",
        args.csv_path.display()
    );

    let mut reader = csv::Reader::from_path(&args.csv_path)?;
    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h == name);

    let id_idx = find(&args.id_column).ok_or_else(|| {
        ServiceError::validation(format!("CSV is missing the '{}' column", args.id_column))
    })?;
    let app_name_idx = find("app_name");
    let description_idx = find("description");
    let category_idx = find("category");
    let category_ko_idx = find("category_ko");
    let installs_idx = find("installs");

    let mut batch: Vec<ImportRecord> = Vec::with_capacity(args.batch_size);
    let mut total: u64 = 0;
    let mut skipped: u64 = 0;

    for result in reader.records() {
        let row = result?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let Some(package_name) = field(Some(id_idx)) else {
            warn!("Skipping row without a '{}' value", args.id_column);
            skipped += 1;
            continue;
        };

        let installs_raw = field(installs_idx).unwrap_or("0");
        let installs_numeric = parse_install_count(installs_raw).unwrap_or_else(|| {
            warn!(
                "Cannot parse install count '{}' (id: {})",
                installs_raw, package_name
            );
            0
        });

        batch.push(ImportRecord {
            package_name: package_name.to_string(),
            app_name: field(app_name_idx).unwrap_or(package_name).to_string(),
            description: field(description_idx).unwrap_or("").to_string(),
            category: field(category_idx).map(String::from),
            category_ko: field(category_ko_idx).map(String::from),
            installs_numeric,
        });
        total += 1;

        if batch.len() >= args.batch_size {
            info!("Committing {} rows...", batch.len());
            catalog.import_batch(&batch).await?;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        info!("Committing remaining {} rows...", batch.len());
        catalog.import_batch(&batch).await?;
    }

    if skipped > 0 {
        warn!("Skipped {} rows without a usable package name", skipped);
    }

    Ok(total)
}

/// Normalize a store-style install count into an integer.
///
/// `"1,000,000,000+"` becomes `1000000000`; anything that still fails
/// to parse after stripping separators yields `None`.
fn parse_install_count(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '+')
        .collect();
    cleaned.parse().ok()
}
