use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let dotenv = dotenvy::dotenv().ok();

    telemetry::init("info", Level::INFO);
    info!(dotenv = ?dotenv, "starting retrieval server");

    api::start_rag().await?;

    Ok(())
}
