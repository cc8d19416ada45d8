//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod ingredient;
pub mod inventory_log;
pub mod menu_item;
pub mod order;
pub mod order_item;
pub mod recipe;

// Re-export specific types to avoid conflicts
pub use ingredient::{Column as IngredientColumn, Entity as Ingredient, Model as IngredientModel};
pub use inventory_log::{
    Column as InventoryLogColumn, Entity as InventoryLog, Model as InventoryLogModel,
};
pub use menu_item::{Column as MenuItemColumn, Entity as MenuItem, Model as MenuItemModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use recipe::{Column as RecipeColumn, Entity as Recipe, Model as RecipeModel};
