//! Recipe entity - the quantity of one ingredient consumed per single unit
//! sold of a menu item. A menu item with zero recipe lines is valid: selling
//! it consumes nothing (e.g., a bottled beverage).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Recipe line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    /// Unique identifier for the recipe line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The menu item this line belongs to
    pub menu_item_id: i64,
    /// The ingredient consumed
    pub ingredient_id: i64,
    /// Quantity of the ingredient needed per unit sold, in `unit`
    pub quantity_needed: f64,
    /// Unit the requirement is expressed in; converted to the ingredient's
    /// stored unit at reservation time
    pub unit: Unit,
}

/// Defines relationships between Recipe and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each recipe line belongs to one menu item
    #[sea_orm(
        belongs_to = "super::menu_item::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_item::Column::Id"
    )]
    MenuItem,
    /// Each recipe line references one ingredient
    #[sea_orm(
        belongs_to = "super::ingredient::Entity",
        from = "Column::IngredientId",
        to = "super::ingredient::Column::Id"
    )]
    Ingredient,
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItem.def()
    }
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
