mod cli;
mod commands;
mod logging;

use anyhow::Context;
use movies::{StoreConfig, StoreError};

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let invocation = cli::parse_args(&args)?;
    let Some(request) = commands::prepare(invocation.command)? else {
        cli::print_help();
        return Ok(());
    };

    // a missing .env file is fine
    let _ = dotenvy::dotenv();
    logging::init(&invocation.log_level)?;

    let config = StoreConfig::from_env().context("failed to load configuration")?;
    let pool = movies::create_pool(&config).context("failed to create connection pool")?;
    let client = pool
        .get()
        .await
        .context("failed to acquire a database connection")?;
    tracing::debug!(table = %config.table, "connected");

    commands::run(request, &client, &config.table).await
}

/// Process exit status for a failed run: 2 for bad input, 3 for a missing
/// movie, 4 for storage failures, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<movies::ValidationErrors>().is_some() {
        return 2;
    }
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::InvalidInput(_)) | Some(StoreError::NoFieldsToUpdate) => 2,
        Some(StoreError::NotFound { .. }) => 3,
        Some(StoreError::Storage(_)) => 4,
        None => 1,
    }
}
