//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{inventory, menu, recipe},
    entities,
    errors::Result,
    units::Unit,
};
use sea_orm::{ConnectOptions, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
///
/// The pool is capped at one connection so every query in a test sees the
/// same in-memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test menu item with sensible defaults.
///
/// # Defaults
/// * price: 10.0
/// * description/category: None
pub async fn create_test_menu_item(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::menu_item::Model> {
    menu::create_menu_item(db, name.to_string(), 10.0, None, None).await
}

/// Creates a test menu item with a custom price.
pub async fn create_priced_menu_item(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
) -> Result<entities::menu_item::Model> {
    menu::create_menu_item(db, name.to_string(), price, None, None).await
}

/// Creates a test ingredient by restocking it from nothing, so the stock
/// addition is logged the same way production stock is.
pub async fn create_test_ingredient(
    db: &DatabaseConnection,
    name: &str,
    quantity: f64,
    unit: Unit,
) -> Result<entities::ingredient::Model> {
    inventory::restock(db, name, quantity, unit).await
}

/// Defines a menu item's recipe from `(ingredient_id, quantity_needed, unit)`
/// triples.
pub async fn set_test_recipe(
    db: &DatabaseConnection,
    menu_item_id: i64,
    lines: &[(i64, f64, Unit)],
) -> Result<Vec<entities::recipe::Model>> {
    let inputs: Vec<recipe::RecipeLineInput> = lines
        .iter()
        .map(|&(ingredient_id, quantity_needed, unit)| recipe::RecipeLineInput {
            ingredient_id,
            quantity_needed,
            unit,
        })
        .collect();
    recipe::set_recipe(db, menu_item_id, &inputs).await
}

/// Sets up the standard deduction scenario: rice stocked at 5000 g and a
/// "Fried Rice" item priced 850.0 whose recipe needs 2 kg of rice per unit.
/// Returns (db, menu item, ingredient).
pub async fn setup_fried_rice() -> Result<(
    DatabaseConnection,
    entities::menu_item::Model,
    entities::ingredient::Model,
)> {
    let db = setup_test_db().await?;
    let rice = create_test_ingredient(&db, "Rice", 5000.0, Unit::Gram).await?;
    let fried_rice = create_priced_menu_item(&db, "Fried Rice", 850.0).await?;
    set_test_recipe(&db, fried_rice.id, &[(rice.id, 2.0, Unit::Kilogram)]).await?;
    Ok((db, fried_rice, rice))
}
