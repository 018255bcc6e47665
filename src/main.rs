use anyhow::Result;
use ssc_crawler::orchestrator::App;
use ssc_crawler::utils::logging;
use ssc_crawler::Config;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env();

    // ticker from the command line, falling back to the configured default
    let stock_code = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.default_stock.clone());

    let app = App::initialize(config).await?;
    app.run(&stock_code).await?;

    Ok(())
}
