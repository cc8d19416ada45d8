use dotenvy::dotenv;
use resto_pos::{
    config::{database, settings},
    core::{inventory, order},
    errors::Result,
};
use sea_orm::Database;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load .env file; env vars can also be set externally
    dotenv().ok();

    let settings = settings::load_default_settings()?;

    let db = match &settings.database_url {
        Some(url) => Database::connect(url.as_str()).await?,
        None => database::create_connection().await?,
    };
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    let ongoing = order::ongoing_orders(&db).await?;
    info!("{} ongoing order(s)", ongoing.len());
    for open_order in &ongoing {
        info!(
            "  order {} ({:?}) total {:.2}",
            open_order.id, open_order.kind, open_order.total_price
        );
    }

    let low = inventory::low_stock(&db, settings.low_stock_threshold).await?;
    if low.is_empty() {
        info!(
            "No ingredients below the low-stock threshold of {}",
            settings.low_stock_threshold
        );
    } else {
        for ingredient in &low {
            warn!(
                "Low stock: '{}' at {} {}",
                ingredient.name, ingredient.quantity, ingredient.unit
            );
        }
    }

    Ok(())
}
