use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use ops_common::masked_tail;
use price_sync_engine::{
    db_types::AccountSelector,
    traits::PriceStore,
    OzonFeed,
    PriceSyncApi,
    RestPriceStore,
    TomlAccountDirectory,
};
use price_sync_server::{config::ServerConfig, server::OpsSyncApi};

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Operator tools for the Ozon price sync service")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one price sync. With no arguments, every configured account is synced.
    Sync(SyncParams),
    /// Ask the storage service to collapse duplicate rows in the price table
    Dedup,
    /// List the accounts configured in the accounts file. API keys are masked.
    Accounts,
}

#[derive(Debug, Args)]
pub struct SyncParams {
    /// Sync every configured account (the default when no ids are given)
    #[arg(long, conflicts_with = "ids")]
    all: bool,
    /// Comma-separated list of client ids to sync, e.g. --ids 1,2,3
    #[arg(long, value_delimiter = ',')]
    ids: Vec<i64>,
}

impl SyncParams {
    fn selector(&self) -> AccountSelector {
        if self.all || self.ids.is_empty() {
            AccountSelector::all()
        } else if self.ids.len() == 1 {
            AccountSelector::Single(self.ids[0])
        } else {
            AccountSelector::Multiple(self.ids.clone())
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Arguments::parse();
    let config = ServerConfig::from_env_or_default();
    match args.command {
        Command::Sync(params) => run_sync(&config, params.selector()).await,
        Command::Dedup => run_dedup(&config).await,
        Command::Accounts => list_accounts(&config),
    }
}

fn new_sync_api(config: &ServerConfig) -> OpsSyncApi {
    let directory = TomlAccountDirectory::new(config.accounts_file.clone());
    let source = OzonFeed::new(config.ozon.clone());
    let store = new_price_store(config);
    PriceSyncApi::new(directory, source, store, config.shop_id)
}

fn new_price_store(config: &ServerConfig) -> RestPriceStore {
    match RestPriceStore::new(config.storage_url.clone()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error creating the storage client: {e}");
            std::process::exit(1);
        },
    }
}

async fn run_sync(config: &ServerConfig, selector: AccountSelector) {
    let api = new_sync_api(config);
    match api.run(&selector).await {
        Ok(summary) => {
            println!(
                "Price sync finished. {} of {} account(s) complete, {} record(s) projected.",
                summary.completed_count(),
                summary.reports.len(),
                summary.total_records()
            );
            for report in &summary.reports {
                println!(
                    "  client {}: {} ({} items fetched, {} records, {} chunk(s) sent, {} failed)",
                    report.client_id,
                    report.status,
                    report.items_fetched,
                    report.records_projected,
                    report.chunks_sent,
                    report.chunks_failed
                );
            }
            if !summary.dedup_ok {
                eprintln!("Warning: the deduplication pass failed. Check the logs for details.");
            }
        },
        Err(e) => {
            eprintln!("Error running price sync: {e}");
            std::process::exit(1);
        },
    }
}

async fn run_dedup(config: &ServerConfig) {
    let store = new_price_store(config);
    match store.delete_duplicate_prices().await {
        Ok(()) => println!("Duplicates were deleted from the price table"),
        Err(e) => {
            eprintln!("Error deleting duplicates: {e}");
            std::process::exit(1);
        },
    }
}

fn list_accounts(config: &ServerConfig) {
    let directory = TomlAccountDirectory::new(config.accounts_file.clone());
    match directory.read_accounts() {
        Ok(file) => {
            if file.accounts.is_empty() {
                println!("No accounts configured in {}", config.accounts_file.display());
                return;
            }
            for entry in file.accounts {
                let name = entry.name.unwrap_or_default();
                println!("{:>12}  {:<24}  {name}", entry.client_id, masked_tail(&entry.api_key, 4));
            }
        },
        Err(e) => {
            eprintln!("Error reading the accounts file: {e}");
            std::process::exit(1);
        },
    }
}
