//! Menu item business logic.
//!
//! Thin read/write wrappers over the menu table. The order transaction only
//! ever reads menu items; it snapshots their name and price into order lines
//! so edits made here never rewrite history.

use crate::{
    entities::{MenuItem, menu_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all menu items, ordered alphabetically by name.
pub async fn get_all_menu_items(db: &DatabaseConnection) -> Result<Vec<menu_item::Model>> {
    MenuItem::find()
        .order_by_asc(menu_item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific menu item by its unique ID.
pub async fn get_menu_item_by_id(
    db: &DatabaseConnection,
    menu_item_id: i64,
) -> Result<Option<menu_item::Model>> {
    MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new menu item, performing input validation.
///
/// The name must be non-empty after trimming and the price must be a finite,
/// non-negative number.
pub async fn create_menu_item(
    db: &DatabaseConnection,
    name: String,
    price: f64,
    description: Option<String>,
    category: Option<String>,
) -> Result<menu_item::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("menu item name cannot be empty"));
    }

    if !price.is_finite() || price < 0.0 {
        return Err(Error::validation(format!(
            "menu item price must be a non-negative number, got {price}"
        )));
    }

    let menu_item = menu_item::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        description: Set(description),
        category: Set(category),
        ..Default::default()
    };

    menu_item.insert(db).await.map_err(Into::into)
}

/// Updates an existing menu item's name and price.
///
/// Historical order lines keep the name/price they snapshotted at order
/// time; only future orders see the new values.
pub async fn update_menu_item(
    db: &DatabaseConnection,
    menu_item_id: i64,
    new_name: String,
    new_price: f64,
) -> Result<menu_item::Model> {
    if new_name.trim().is_empty() {
        return Err(Error::validation("menu item name cannot be empty"));
    }

    if !new_price.is_finite() || new_price < 0.0 {
        return Err(Error::validation(format!(
            "menu item price must be a non-negative number, got {new_price}"
        )));
    }

    let mut menu_item: menu_item::ActiveModel = MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await?
        .ok_or(Error::MenuItemNotFound { id: menu_item_id })?
        .into();

    menu_item.name = Set(new_name.trim().to_string());
    menu_item.price = Set(new_price);

    menu_item.update(db).await.map_err(Into::into)
}
