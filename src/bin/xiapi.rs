//! Downloads main, SKU, and description images from a Xiapi product page.

use anyhow::Result;
use product_images::{Marketplace, run_cli};

#[tokio::main]
async fn main() -> Result<()> {
    run_cli(Marketplace::Xiapi).await
}
