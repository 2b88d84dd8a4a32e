use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine: variables may come from the real environment.
    let dotenv = dotenvy::dotenv().ok();

    telemetry::init("info", Level::INFO);
    info!(dotenv = ?dotenv, "starting legal assistant relay");

    api::start().await?;

    Ok(())
}
