//! Menu item entity - one sellable item on the menu.
//!
//! Menu items are read-only snapshots during order processing: order lines
//! capture the item's name and price at order time, so later price edits do
//! not retroactively change historical order totals.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    /// Unique identifier for the menu item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the item (e.g., "Fried Rice")
    pub name: String,
    /// Current unit price
    pub price: f64,
    /// Optional free-text description
    pub description: Option<String>,
    /// Optional category for menu organization (e.g., "mains", "beverages")
    pub category: Option<String>,
}

/// Defines relationships between `MenuItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One menu item has many recipe lines
    #[sea_orm(has_many = "super::recipe::Entity")]
    Recipes,
    /// One menu item appears on many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
