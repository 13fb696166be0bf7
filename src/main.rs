use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> { masthead::console::run().await }
