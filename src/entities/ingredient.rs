//! Ingredient entity - current stock per ingredient.
//!
//! Each ingredient holds a single quantity in a single unit of measure;
//! inventory is never mixed-unit. The quantity is mutated only by the order
//! transaction (decrement) and by restocking (increment), and must never be
//! observed negative.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Ingredient stock database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    /// Unique identifier for the ingredient
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Normalized name (trimmed, lowercased), unique across the table
    #[sea_orm(unique)]
    pub name: String,
    /// Current stock quantity, in `unit`; never negative
    pub quantity: f64,
    /// The single unit this ingredient's stock is kept in
    pub unit: Unit,
}

/// Defines relationships between Ingredient and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One ingredient is referenced by many recipe lines
    #[sea_orm(has_many = "super::recipe::Entity")]
    Recipes,
    /// One ingredient has many stock-change log entries
    #[sea_orm(has_many = "super::inventory_log::Entity")]
    InventoryLogs,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::inventory_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
