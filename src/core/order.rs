//! Order transaction manager and order lifecycle.
//!
//! [`place_order`] is the one operation in the system with real invariants:
//! pricing, order/line persistence, recipe expansion, unit conversion, and
//! stock decrement all happen inside a single database transaction. Either
//! the order and every implied ingredient deduction commit together, or
//! nothing persists at all.
//!
//! Lifecycle operations ([`process_payment`], [`mark_completed`],
//! [`print_kitchen_ticket`], [`add_lines`]) act on the persisted order
//! afterwards; status only ever moves `Ongoing -> Completed`.

use std::str::FromStr;

use crate::{
    core::{inventory, recipe},
    entities::{
        MenuItem, Order, OrderItem,
        order::{self, OrderKind, OrderStatus},
        order_item,
    },
    errors::{Error, Result},
    units::Unit,
};
use sea_orm::{
    ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use tracing::{debug, info};

/// One requested order line: a menu item and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInput {
    /// The menu item being ordered
    pub menu_item_id: i64,
    /// Number of units; must be at least 1
    pub quantity: i32,
}

/// A successfully placed (or amended) order with its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    /// The persisted order row
    pub order: order::Model,
    /// All line items currently on the order, in insertion order
    pub items: Vec<order_item::Model>,
}

/// Recognized payment method tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Paid in cash
    Cash,
    /// Paid by card
    Card,
}

impl PaymentMethod {
    /// The wire tag for this method.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            other => Err(Error::validation(format!(
                "unrecognized payment method '{other}'"
            ))),
        }
    }
}

/// Fail-fast checks on the requested lines, before any storage access.
fn validate_lines(lines: &[LineInput]) -> Result<()> {
    if lines.is_empty() {
        return Err(Error::validation("an order needs at least one line"));
    }
    for line in lines {
        if line.quantity < 1 {
            return Err(Error::validation(format!(
                "quantity for menu item {} must be at least 1",
                line.menu_item_id
            )));
        }
    }
    Ok(())
}

fn validate_request(kind: OrderKind, table_number: Option<i32>, lines: &[LineInput]) -> Result<()> {
    validate_lines(lines)?;
    match kind {
        OrderKind::DineIn if table_number.is_none() => Err(Error::validation(
            "table number is required for Dine-In orders",
        )),
        OrderKind::Takeaway if table_number.is_some() => Err(Error::validation(
            "table number is only valid for Dine-In orders",
        )),
        _ => Ok(()),
    }
}

/// Prices and persists the given lines for `order_id`, then reserves every
/// ingredient their recipes imply. Returns the price total of the new lines
/// and the inserted line items.
///
/// Must run inside the caller's transaction: any error out of here is the
/// signal to roll the whole order back.
async fn stage_lines<C>(
    conn: &C,
    order_id: i64,
    lines: &[LineInput],
) -> Result<(f64, Vec<order_item::Model>)>
where
    C: ConnectionTrait,
{
    let mut total = 0.0;
    let mut items = Vec::with_capacity(lines.len());
    let mut requirements: Vec<(i64, f64, Unit)> = Vec::new();

    for line in lines {
        let menu_item = MenuItem::find_by_id(line.menu_item_id)
            .one(conn)
            .await?
            .ok_or(Error::MenuItemNotFound {
                id: line.menu_item_id,
            })?;

        // Snapshot name and price so later menu edits never change history
        let item = order_item::ActiveModel {
            order_id: Set(order_id),
            menu_item_id: Set(menu_item.id),
            name: Set(menu_item.name.clone()),
            price: Set(menu_item.price),
            quantity: Set(line.quantity),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        total += menu_item.price * f64::from(line.quantity);

        for recipe_line in recipe::expand(conn, menu_item.id).await? {
            requirements.push((
                recipe_line.ingredient_id,
                recipe_line.quantity_needed * f64::from(line.quantity),
                recipe_line.unit,
            ));
        }

        items.push(item);
    }

    // Reserve in ascending ingredient order so two concurrent multi-ingredient
    // orders cannot take row locks in opposite order and deadlock.
    requirements.sort_by_key(|&(ingredient_id, _, _)| ingredient_id);
    for (ingredient_id, required, unit) in requirements {
        inventory::reserve(conn, ingredient_id, required, unit).await?;
    }

    Ok((total, items))
}

/// Places a new order: prices each line from the live menu, persists the
/// order and its line items, and deducts every ingredient the lines' recipes
/// imply - all in one transaction.
///
/// Duplicate lines for the same menu item are honored independently, not
/// merged. A line whose menu item has no recipe consumes nothing.
///
/// # Errors
/// - [`Error::Validation`] for an empty order, a non-positive quantity, or a
///   table number that is missing on Dine-In / present on Takeaway. Checked
///   before any storage access.
/// - [`Error::MenuItemNotFound`] naming the first missing menu item id.
/// - [`Error::InsufficientStock`] / [`Error::UnitMismatch`] from the
///   reservation path.
///
/// On any error, no order, no line items, and no stock changes persist.
pub async fn place_order(
    db: &DatabaseConnection,
    kind: OrderKind,
    table_number: Option<i32>,
    lines: &[LineInput],
) -> Result<PlacedOrder> {
    validate_request(kind, table_number, lines)?;

    // One transaction for order + lines + deductions: a partial commit would
    // corrupt the stock invariant. Dropping the uncommitted transaction on
    // any error path below rolls everything back.
    let txn = db.begin().await?;

    let placed = order::ActiveModel {
        kind: Set(kind),
        table_number: Set(table_number),
        total_price: Set(0.0),
        status: Set(OrderStatus::Ongoing),
        kot_printed: Set(false),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let (total, items) = stage_lines(&txn, placed.id, lines).await?;

    let mut placed: order::ActiveModel = placed.into();
    placed.total_price = Set(total);
    let placed = placed.update(&txn).await?;

    txn.commit().await?;

    info!(
        "Placed order {} ({:?}) with {} line(s), total {:.2}",
        placed.id,
        placed.kind,
        items.len(),
        placed.total_price
    );
    Ok(PlacedOrder {
        order: placed,
        items,
    })
}

/// Adds lines to an existing `Ongoing` order, re-pricing and re-deducting
/// inventory for the new lines only, in one transaction.
///
/// Deduction applies to incremental lines exactly as it does at initial
/// placement; a `Completed` order rejects the call.
pub async fn add_lines(
    db: &DatabaseConnection,
    order_id: i64,
    lines: &[LineInput],
) -> Result<PlacedOrder> {
    validate_lines(lines)?;

    let txn = db.begin().await?;

    let existing = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if existing.status == OrderStatus::Completed {
        return Err(Error::validation(format!(
            "order {order_id} is already completed and cannot receive new lines"
        )));
    }

    let (delta, _new_items) = stage_lines(&txn, order_id, lines).await?;

    Order::update_many()
        .col_expr(
            order::Column::TotalPrice,
            Expr::col(order::Column::TotalPrice).add(delta),
        )
        .filter(order::Column::Id.eq(order_id))
        .exec(&txn)
        .await?;

    let updated = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(&txn)
        .await?;

    txn.commit().await?;

    info!(
        "Added {} line(s) to order {}, total now {:.2}",
        lines.len(),
        order_id,
        updated.total_price
    );
    Ok(PlacedOrder {
        order: updated,
        items,
    })
}

/// The one-way `Ongoing -> Completed` transition shared by payment and
/// manual completion.
async fn transition_to_completed(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    let existing = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if existing.status == OrderStatus::Completed {
        return Err(Error::validation(format!(
            "order {order_id} is already completed"
        )));
    }

    let mut active: order::ActiveModel = existing.into();
    active.status = Set(OrderStatus::Completed);
    active.update(db).await.map_err(Into::into)
}

/// Completes an order after payment with a recognized method.
pub async fn process_payment(
    db: &DatabaseConnection,
    order_id: i64,
    method: PaymentMethod,
) -> Result<order::Model> {
    let completed = transition_to_completed(db, order_id).await?;
    info!(
        "Payment for order {} completed using {}",
        completed.id,
        method.label()
    );
    Ok(completed)
}

/// Marks an order as completed without going through payment.
pub async fn mark_completed(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    let completed = transition_to_completed(db, order_id).await?;
    info!("Order {} marked as completed", completed.id);
    Ok(completed)
}

/// Prints the kitchen order ticket for an order and records that it was
/// printed. Printing happens at most once: a repeat call is a no-op success,
/// and the flag may also be set on a `Completed` order.
pub async fn print_kitchen_ticket(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<order::Model> {
    let existing = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if existing.kot_printed {
        debug!("Kitchen ticket for order {} already printed", order_id);
        return Ok(existing);
    }

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await?;
    for item in &items {
        info!(
            "KOT order {}: {} x {}",
            order_id, item.quantity, item.name
        );
    }

    let mut active: order::ActiveModel = existing.into();
    active.kot_printed = Set(true);
    active.update(db).await.map_err(Into::into)
}

/// All orders still in the `Ongoing` state, oldest first.
pub async fn ongoing_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::Status.eq(OrderStatus::Ongoing))
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The line items of an order, in insertion order.
pub async fn order_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_item::Model>> {
    OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
