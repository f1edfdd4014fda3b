//! CLI probe for the lookup core.
//!
//! # Responsibility
//! - Resolve store credentials from the environment and answer one
//!   question per invocation.
//! - Keep replies on stdout; logs go to stderr.

use opsdesk_core::{
    core_version, default_log_level, init_logging, CatalogService, LogSink, LookupService,
    PgProcessRepository, StoreConfig,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(err) = init_logging(default_log_level(), LogSink::Stderr) {
        eprintln!("opsdesk: {err}");
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--version") {
        println!("opsdesk_core version={}", core_version());
        return ExitCode::SUCCESS;
    }

    // Credentials are required up front; a probe with a broken environment
    // should fail loudly instead of answering with store-failure replies.
    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("opsdesk: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = PgProcessRepository::new(&config);

    if args.first().map(String::as_str) == Some("--sections") {
        let catalog = CatalogService::new(repo).catalog().await;
        for (section, records) in &catalog {
            println!("{section} ({})", records.len());
            for record in records {
                println!("  {}", record.title);
            }
        }
        return ExitCode::SUCCESS;
    }

    let question = args.join(" ");
    let reply = LookupService::new(repo).answer(&question).await;
    println!("{reply}");
    ExitCode::SUCCESS
}
