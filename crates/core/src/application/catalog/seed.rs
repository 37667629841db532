// Demo catalog seeding

use crate::domain::Product;
use crate::error::Result;
use crate::port::{IdProvider, ProductRepository};
use rust_decimal::Decimal;
use tracing::info;

/// Number of demo products inserted into an empty catalog
pub const DEFAULT_SEED_COUNT: u32 = 100;

/// Insert `count` demo products when the catalog is empty.
///
/// Returns the number of products inserted (0 if the catalog already had data).
pub async fn seed_if_empty(
    product_repo: &dyn ProductRepository,
    id_provider: &dyn IdProvider,
    count: u32,
) -> Result<u32> {
    if product_repo.count().await? > 0 {
        info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    for i in 1..=count {
        let order = i32::try_from(i).unwrap_or(i32::MAX);
        let product = Product::new(
            id_provider.generate_id(),
            format!("Product {}", i),
            format!("https://picsum.photos/seed/{}/200", i),
            Decimal::from(100 + i),
            order,
        )
        .with_description(format!("Description for product {}", i))
        .with_stock(i);

        product_repo.insert(&product).await?;
    }

    info!(count, "Seeded demo catalog");
    Ok(count)
}
