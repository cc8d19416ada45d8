//! Recipe catalog - per-item ingredient requirements.
//!
//! From the order transaction's perspective this module is read-only:
//! [`expand`] returns the ordered recipe lines for a menu item, and an empty
//! result means selling the item consumes nothing (not an error).

use crate::{
    entities::{MenuItem, Recipe, recipe},
    errors::{Error, Result},
    units::Unit,
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};

/// One requested recipe line when (re)defining a menu item's recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeLineInput {
    /// The ingredient consumed
    pub ingredient_id: i64,
    /// Quantity needed per unit sold, in `unit`
    pub quantity_needed: f64,
    /// Unit the requirement is expressed in
    pub unit: Unit,
}

/// Returns the ordered recipe lines for a menu item.
///
/// An item with no recipe yields an empty vector: it is sold without
/// consuming tracked inventory. Generic over the connection so the order
/// transaction can call it mid-transaction.
pub async fn expand<C>(conn: &C, menu_item_id: i64) -> Result<Vec<recipe::Model>>
where
    C: ConnectionTrait,
{
    Recipe::find()
        .filter(recipe::Column::MenuItemId.eq(menu_item_id))
        .order_by_asc(recipe::Column::Id)
        .all(conn)
        .await
        .map_err(Into::into)
}

/// Atomically replaces a menu item's recipe with the given lines.
///
/// Existing lines for the item are deleted and the new ones inserted in one
/// transaction, so concurrent readers never observe a half-replaced recipe.
pub async fn set_recipe(
    db: &DatabaseConnection,
    menu_item_id: i64,
    lines: &[RecipeLineInput],
) -> Result<Vec<recipe::Model>> {
    if lines.is_empty() {
        return Err(Error::validation("a recipe needs at least one line"));
    }
    for line in lines {
        if !line.quantity_needed.is_finite() || line.quantity_needed <= 0.0 {
            return Err(Error::validation(format!(
                "recipe quantity for ingredient {} must be a positive number, got {}",
                line.ingredient_id, line.quantity_needed
            )));
        }
    }

    let txn = db.begin().await?;

    MenuItem::find_by_id(menu_item_id)
        .one(&txn)
        .await?
        .ok_or(Error::MenuItemNotFound { id: menu_item_id })?;

    Recipe::delete_many()
        .filter(recipe::Column::MenuItemId.eq(menu_item_id))
        .exec(&txn)
        .await?;

    for line in lines {
        recipe::ActiveModel {
            menu_item_id: Set(menu_item_id),
            ingredient_id: Set(line.ingredient_id),
            quantity_needed: Set(line.quantity_needed),
            unit: Set(line.unit),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    let replaced = expand(&txn, menu_item_id).await?;
    txn.commit().await?;

    Ok(replaced)
}
