//! Inventory log entity - append-only record of every stock change.
//!
//! A row is created on every ledger mutation (negative delta for order
//! reservations, positive for restocks) and is never updated or deleted.
//! This is the audit trail behind stock-trend reporting.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Inventory log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_log")]
pub struct Model {
    /// Unique identifier for the log entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The ingredient whose stock changed
    pub ingredient_id: i64,
    /// Signed stock change, in the ingredient's stored unit
    pub delta: f64,
    /// The ingredient's stored unit at the time of the change
    pub unit: Unit,
    /// When the change happened
    pub logged_at: DateTimeUtc,
}

/// Defines relationships between `InventoryLog` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each log entry belongs to one ingredient
    #[sea_orm(
        belongs_to = "super::ingredient::Entity",
        from = "Column::IngredientId",
        to = "super::ingredient::Column::Id"
    )]
    Ingredient,
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
