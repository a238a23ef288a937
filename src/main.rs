use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use manutenzioni::filter::available_frequencies;
use manutenzioni::generator::common::default_sheet_filename;
use manutenzioni::generator::pipeline::generate_on_worker;
use manutenzioni::models::Frequency;
use manutenzioni::store::{JsonStore, DEFAULT_DB_FILE};
use manutenzioni::SheetGenerator;

#[derive(Parser)]
#[command(name = "manutenzioni", version, about = "Genera schede di manutenzione periodica in PDF compilabile")]
struct Cli {
    /// Store file (overrides the MANUTENZIONI_DB env var)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the installations in the store
    List,
    /// Show the selectable frequencies for an installation
    Frequencies {
        /// Installation code, e.g. GE
        code: String,
    },
    /// List the clients in the store
    Clients,
    /// Generate the inspection sheet PDF
    Generate {
        /// Installation code, e.g. GE
        code: String,
        /// Selected frequency, e.g. 12m or 1a
        frequency: Frequency,
        /// Output PDF path; defaults to a name derived from the installation
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Client name (or stored client id) for the sheet header
        #[arg(long)]
        client: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let db_path = cli
        .db
        .or_else(|| std::env::var("MANUTENZIONI_DB").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));

    let store = JsonStore::open(&db_path)
        .with_context(|| format!("cannot open store at {}", db_path.display()))?;

    match cli.command {
        Command::List => {
            for installation in store.installations() {
                println!(
                    "{:<6} {} ({} attività)",
                    installation.code,
                    installation.name,
                    installation.activities.len()
                );
            }
        }
        Command::Frequencies { code } => {
            let installation = store
                .installation(&code)
                .with_context(|| format!("no installation with code '{code}'"))?;
            for frequency in available_frequencies(&installation.activities) {
                println!("{frequency}");
            }
        }
        Command::Clients => {
            for client in store.clients() {
                println!("{}  {}", client.id, client.name);
            }
        }
        Command::Generate {
            code,
            frequency,
            out,
            client,
        } => {
            let installation = store
                .installation(&code)
                .with_context(|| format!("no installation with code '{code}'"))?;

            let out =
                out.unwrap_or_else(|| default_sheet_filename(&installation, &frequency).into());
            let client_name = client.map(|given| resolve_client_name(&store, &given));
            let generator = Arc::new(SheetGenerator::new()?);

            let sheet =
                generate_on_worker(generator, installation, frequency, out, client_name).await?;
            println!(
                "PDF generato: {} ({} attività, {} byte)",
                sheet.path.display(),
                sheet.activity_count,
                sheet.size_bytes
            );
        }
    }

    Ok(())
}

/// A `--client` argument may be a stored client id, a stored client name, or
/// a free-text name used as-is.
fn resolve_client_name(store: &JsonStore, given: &str) -> String {
    if let Ok(id) = given.parse::<uuid::Uuid>() {
        if let Some(client) = store.client(&id) {
            return client.name;
        }
    }
    store
        .clients()
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(given))
        .map(|c| c.name)
        .unwrap_or_else(|| given.to_string())
}
