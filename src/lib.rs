pub mod commands;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod insights;
pub mod log;
pub mod logging;
pub mod models;
pub mod plan;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod test_utils;

use config::AppConfig;
use db::AppState;

/// Shell entry point: open the journal and print the current insights as JSON
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = AppConfig::from_env()?;
  logging::init_logging(config.log_format)?;

  let runtime = tokio::runtime::Runtime::new()?;
  runtime.block_on(async move {
    let pool = db::initialize_db(&config).await?;
    let state = AppState { db: pool };

    let insights = commands::insights::get_insights(&state).await?;
    println!("{}", serde_json::to_string_pretty(&insights)?);

    state.db.close().await;
    Ok::<(), Box<dyn std::error::Error>>(())
  })
}
