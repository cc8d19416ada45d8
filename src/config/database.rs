//! Database configuration module for `RestoPos`.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. Table creation uses `Schema::create_table_from_entity` so the
//! database schema is generated from the entity definitions directly, without
//! hand-written SQL.
//!
//! The connection handle returned here is passed explicitly into every core
//! operation; there is no process-wide ambient session.

use crate::entities::{Ingredient, InventoryLog, MenuItem, Order, OrderItem, Recipe};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns the default
/// `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/resto_pos.sqlite".to_string())
}

/// Establishes a connection to the database.
///
/// Uses `DATABASE_URL` from the environment, falling back to a local
/// `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Creates tables for menu items, ingredients, recipes, orders, order items,
/// and the inventory log.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut menu_item_table = schema.create_table_from_entity(MenuItem);
    let mut ingredient_table = schema.create_table_from_entity(Ingredient);
    let mut recipe_table = schema.create_table_from_entity(Recipe);
    let mut order_table = schema.create_table_from_entity(Order);
    let mut order_item_table = schema.create_table_from_entity(OrderItem);
    let mut inventory_log_table = schema.create_table_from_entity(InventoryLog);

    // Startup is allowed to run against an already-initialized database
    db.execute(builder.build(menu_item_table.if_not_exists()))
        .await?;
    db.execute(builder.build(ingredient_table.if_not_exists()))
        .await?;
    db.execute(builder.build(recipe_table.if_not_exists()))
        .await?;
    db.execute(builder.build(order_table.if_not_exists())).await?;
    db.execute(builder.build(order_item_table.if_not_exists()))
        .await?;
    db.execute(builder.build(inventory_log_table.if_not_exists()))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        IngredientModel, InventoryLogModel, MenuItemModel, OrderItemModel, OrderModel, RecipeModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        // Running again against an initialized database is a no-op
        create_tables(&db).await?;

        // Tables exist if querying them succeeds
        let _: Vec<MenuItemModel> = MenuItem::find().limit(1).all(&db).await?;
        let _: Vec<IngredientModel> = Ingredient::find().limit(1).all(&db).await?;
        let _: Vec<RecipeModel> = Recipe::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<OrderItemModel> = OrderItem::find().limit(1).all(&db).await?;
        let _: Vec<InventoryLogModel> = InventoryLog::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_default_database_url() {
        if std::env::var("DATABASE_URL").is_err() {
            assert!(get_database_url().starts_with("sqlite://"));
        }
    }
}
