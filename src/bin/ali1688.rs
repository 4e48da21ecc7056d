//! Downloads main, SKU, and description images from a 1688 product page.

use anyhow::Result;
use product_images::{Marketplace, run_cli};

#[tokio::main]
async fn main() -> Result<()> {
    run_cli(Marketplace::Ali1688).await
}
