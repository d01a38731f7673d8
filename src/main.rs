use anyhow::Result;
use ethbox::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
