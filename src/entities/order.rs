//! Order entity - one placed order and its lifecycle flags.
//!
//! `kind` and `status` are closed enumerations stored as strings, replacing
//! the stringly-typed fields of older schemas. Status moves one way only:
//! `Ongoing -> Completed`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether the order is eaten in-house or taken away.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum OrderKind {
    /// Order leaves the restaurant; no table is assigned
    #[sea_orm(string_value = "Takeaway")]
    Takeaway,
    /// Order is served at a table; a table number is required
    #[sea_orm(string_value = "Dine-In")]
    DineIn,
}

/// Lifecycle state of an order.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum OrderStatus {
    /// Still open; may receive additional lines
    #[sea_orm(string_value = "Ongoing")]
    Ongoing,
    /// Paid or closed; rejects all mutation except the kitchen-ticket flag
    #[sea_orm(string_value = "Completed")]
    Completed,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Takeaway or Dine-In
    pub kind: OrderKind,
    /// Table number; present iff `kind` is Dine-In
    pub table_number: Option<i32>,
    /// Total price, the sum of line quantity x snapshotted unit price
    pub total_price: f64,
    /// Ongoing or Completed
    pub status: OrderStatus,
    /// Whether the kitchen order ticket has been printed (set at most once)
    pub kot_printed: bool,
    /// When the order was created
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
