use anyhow::Result;
use ssc_crawler::utils::logging;
use ssc_crawler::{api, Config};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env();
    api::serve(config).await
}
