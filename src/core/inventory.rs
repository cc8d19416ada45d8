//! Inventory ledger - stock levels, restocking, and atomic reservations.
//!
//! Every mutation appends an entry to the append-only inventory log in the
//! same transaction scope, so committed stock changes are always visible to
//! downstream reporting alongside the orders that caused them.
//!
//! The reservation path is the concurrency-critical part of the crate: the
//! decrement is a single conditional UPDATE, never a read-compare-write, so
//! two concurrent orders competing for the last units of an ingredient can
//! never both succeed.

use crate::{
    entities::{Ingredient, InventoryLog, ingredient, inventory_log},
    errors::{Error, Result},
    units::{self, Unit},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{debug, info};

/// Canonical form of an ingredient name: trimmed and lowercased.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Retrieves an ingredient by its unique ID.
pub async fn get_ingredient_by_id(
    db: &DatabaseConnection,
    ingredient_id: i64,
) -> Result<Option<ingredient::Model>> {
    Ingredient::find_by_id(ingredient_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an ingredient by name, applying the same normalization used when
/// storing it.
pub async fn get_ingredient_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<ingredient::Model>> {
    Ingredient::find()
        .filter(ingredient::Column::Name.eq(normalize_name(name)))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all ingredients, ordered alphabetically by name.
pub async fn get_all_ingredients(db: &DatabaseConnection) -> Result<Vec<ingredient::Model>> {
    Ingredient::find()
        .order_by_asc(ingredient::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Current stock of an ingredient as `(quantity, unit)`.
///
/// # Errors
/// Returns [`Error::IngredientNotFound`] if the ingredient does not exist.
pub async fn current_stock(db: &DatabaseConnection, ingredient_id: i64) -> Result<(f64, Unit)> {
    let ingredient = get_ingredient_by_id(db, ingredient_id)
        .await?
        .ok_or(Error::IngredientNotFound { id: ingredient_id })?;
    Ok((ingredient.quantity, ingredient.unit))
}

/// Adds stock for an ingredient, creating it on first sight.
///
/// The name is case/whitespace-normalized before lookup. If an ingredient
/// with that name exists, its quantity is incremented; stock is single-unit
/// per ingredient, so a restock in a different unit than the stored one is a
/// hard [`Error::UnitMismatch`]. A positive-delta log entry is appended
/// either way, in the same transaction.
pub async fn restock(
    db: &DatabaseConnection,
    name: &str,
    quantity: f64,
    unit: Unit,
) -> Result<ingredient::Model> {
    let normalized = normalize_name(name);
    if normalized.is_empty() {
        return Err(Error::validation("ingredient name cannot be empty"));
    }
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::validation(format!(
            "restock quantity must be a positive number, got {quantity}"
        )));
    }

    let txn = db.begin().await?;

    let existing = Ingredient::find()
        .filter(ingredient::Column::Name.eq(normalized.as_str()))
        .one(&txn)
        .await?;

    let ingredient_id = match existing {
        Some(existing) => {
            if existing.unit != unit {
                return Err(Error::UnitMismatch {
                    from: unit.label().to_string(),
                    to: existing.unit.label().to_string(),
                });
            }
            Ingredient::update_many()
                .col_expr(
                    ingredient::Column::Quantity,
                    Expr::col(ingredient::Column::Quantity).add(quantity),
                )
                .filter(ingredient::Column::Id.eq(existing.id))
                .exec(&txn)
                .await?;
            existing.id
        }
        None => {
            let created = ingredient::ActiveModel {
                name: Set(normalized.clone()),
                quantity: Set(quantity),
                unit: Set(unit),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            created.id
        }
    };

    inventory_log::ActiveModel {
        ingredient_id: Set(ingredient_id),
        delta: Set(quantity),
        unit: Set(unit),
        logged_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let updated = Ingredient::find_by_id(ingredient_id)
        .one(&txn)
        .await?
        .ok_or(Error::IngredientNotFound { id: ingredient_id })?;

    txn.commit().await?;

    info!(
        "Restocked '{}' by {} {}, now at {} {}",
        updated.name, quantity, unit, updated.quantity, updated.unit
    );
    Ok(updated)
}

/// Reserves stock for one recipe requirement: converts `quantity` into the
/// ingredient's stored unit and decrements it, appending a negative-delta
/// log entry.
///
/// Runs against the caller's connection, which for order placement is the
/// order transaction itself - a failed reservation rolls the whole order
/// back.
///
/// # Errors
/// - [`Error::InsufficientStock`] when the converted amount exceeds current
///   stock, or when the ingredient no longer exists (a missing ingredient
///   has zero stock). No mutation happens in either case.
/// - [`Error::UnitMismatch`] when the requirement's unit family differs from
///   the stored unit's.
pub async fn reserve<C>(conn: &C, ingredient_id: i64, quantity: f64, unit: Unit) -> Result<()>
where
    C: ConnectionTrait,
{
    let Some(ingredient) = Ingredient::find_by_id(ingredient_id).one(conn).await? else {
        return Err(Error::InsufficientStock {
            ingredient: format!("ingredient {ingredient_id}"),
            required: quantity,
            available: 0.0,
            unit: unit.label().to_string(),
        });
    };

    let required = units::convert(quantity, unit, ingredient.unit)?;

    // Single conditional decrement: the row only changes when enough stock
    // remains, so a stale read can never drive the quantity negative.
    let update = Ingredient::update_many()
        .col_expr(
            ingredient::Column::Quantity,
            Expr::col(ingredient::Column::Quantity).sub(required),
        )
        .filter(ingredient::Column::Id.eq(ingredient_id))
        .filter(ingredient::Column::Quantity.gte(required))
        .exec(conn)
        .await?;

    if update.rows_affected == 0 {
        // `available` is a snapshot for diagnostics; the UPDATE above is the
        // authoritative check.
        return Err(Error::InsufficientStock {
            ingredient: ingredient.name,
            required,
            available: ingredient.quantity,
            unit: ingredient.unit.label().to_string(),
        });
    }

    inventory_log::ActiveModel {
        ingredient_id: Set(ingredient_id),
        delta: Set(-required),
        unit: Set(ingredient.unit),
        logged_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    debug!(
        "Reserved {} {} of '{}'",
        required, ingredient.unit, ingredient.name
    );
    Ok(())
}

/// Ingredients whose stock is below the given threshold, ordered by name.
pub async fn low_stock(
    db: &DatabaseConnection,
    threshold: f64,
) -> Result<Vec<ingredient::Model>> {
    Ingredient::find()
        .filter(ingredient::Column::Quantity.lt(threshold))
        .order_by_asc(ingredient::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Stock additions (positive-delta log entries) since `cutoff`, newest
/// first. Feeds the stock-trend section of the inventory report.
pub async fn stock_additions_since(
    db: &DatabaseConnection,
    cutoff: DateTimeUtc,
) -> Result<Vec<inventory_log::Model>> {
    InventoryLog::find()
        .filter(inventory_log::Column::Delta.gt(0.0))
        .filter(inventory_log::Column::LoggedAt.gte(cutoff))
        .order_by_desc(inventory_log::Column::LoggedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_ingredient, setup_test_db};
    use chrono::{Duration, Utc};

    async fn log_entries(
        db: &DatabaseConnection,
        ingredient_id: i64,
    ) -> Result<Vec<inventory_log::Model>> {
        InventoryLog::find()
            .filter(inventory_log::Column::IngredientId.eq(ingredient_id))
            .order_by_asc(inventory_log::Column::Id)
            .all(db)
            .await
            .map_err(Into::into)
    }

    #[tokio::test]
    async fn test_restock_creates_normalized_ingredient() -> Result<()> {
        let db = setup_test_db().await?;

        let rice = restock(&db, "  Rice ", 5000.0, Unit::Gram).await?;
        assert_eq!(rice.name, "rice");
        assert_eq!(rice.quantity, 5000.0);
        assert_eq!(rice.unit, Unit::Gram);

        let entries = log_entries(&db, rice.id).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].delta, 5000.0);
        assert_eq!(entries[0].unit, Unit::Gram);

        Ok(())
    }

    #[tokio::test]
    async fn test_restock_increments_existing_ingredient() -> Result<()> {
        let db = setup_test_db().await?;

        let first = restock(&db, "Rice", 5000.0, Unit::Gram).await?;
        // Different casing and padding must resolve to the same row
        let second = restock(&db, " RICE ", 1000.0, Unit::Gram).await?;

        assert_eq!(second.id, first.id);
        assert_eq!(second.quantity, 6000.0);

        let entries = log_entries(&db, first.id).await?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].delta, 5000.0);
        assert_eq!(entries[1].delta, 1000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_restock_unit_mismatch_is_hard_error() -> Result<()> {
        let db = setup_test_db().await?;

        let rice = restock(&db, "Rice", 5000.0, Unit::Gram).await?;
        let result = restock(&db, "Rice", 2.0, Unit::Liter).await;

        match result.unwrap_err() {
            Error::UnitMismatch { from, to } => {
                assert_eq!(from, "l");
                assert_eq!(to, "g");
            }
            other => panic!("expected UnitMismatch, got {other:?}"),
        }

        // Stock and log are untouched by the failed restock
        let (quantity, _) = current_stock(&db, rice.id).await?;
        assert_eq!(quantity, 5000.0);
        assert_eq!(log_entries(&db, rice.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_restock_validation() -> Result<()> {
        let db = setup_test_db().await?;

        for (name, quantity) in [("", 1.0), ("   ", 1.0), ("rice", 0.0), ("rice", -5.0)] {
            let result = restock(&db, name, quantity, Unit::Gram).await;
            assert!(matches!(
                result.unwrap_err(),
                Error::Validation { message: _ }
            ));
        }

        let result = restock(&db, "rice", f64::NAN, Unit::Gram).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_reserve_converts_and_decrements() -> Result<()> {
        let db = setup_test_db().await?;
        let rice = create_test_ingredient(&db, "Rice", 5000.0, Unit::Gram).await?;

        reserve(&db, rice.id, 2.0, Unit::Kilogram).await?;

        let (quantity, unit) = current_stock(&db, rice.id).await?;
        assert_eq!(quantity, 3000.0);
        assert_eq!(unit, Unit::Gram);

        let entries = log_entries(&db, rice.id).await?;
        assert_eq!(entries.len(), 2); // restock + reservation
        assert_eq!(entries[1].delta, -2000.0);
        assert_eq!(entries[1].unit, Unit::Gram);

        Ok(())
    }

    #[tokio::test]
    async fn test_reserve_insufficient_stock_leaves_no_trace() -> Result<()> {
        let db = setup_test_db().await?;
        let rice = create_test_ingredient(&db, "Rice", 5000.0, Unit::Gram).await?;

        let result = reserve(&db, rice.id, 6.0, Unit::Kilogram).await;
        match result.unwrap_err() {
            Error::InsufficientStock {
                ingredient,
                required,
                available,
                unit,
            } => {
                assert_eq!(ingredient, "rice");
                assert_eq!(required, 6000.0);
                assert_eq!(available, 5000.0);
                assert_eq!(unit, "g");
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        let (quantity, _) = current_stock(&db, rice.id).await?;
        assert_eq!(quantity, 5000.0);
        assert_eq!(log_entries(&db, rice.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_reserve_missing_ingredient_is_insufficient_stock() -> Result<()> {
        let db = setup_test_db().await?;

        let result = reserve(&db, 999, 1.0, Unit::Gram).await;
        match result.unwrap_err() {
            Error::InsufficientStock { available, .. } => assert_eq!(available, 0.0),
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_reserve_unit_mismatch_names_both_units() -> Result<()> {
        let db = setup_test_db().await?;
        let rice = create_test_ingredient(&db, "Rice", 5000.0, Unit::Gram).await?;

        let result = reserve(&db, rice.id, 1.0, Unit::Liter).await;
        match result.unwrap_err() {
            Error::UnitMismatch { from, to } => {
                assert_eq!(from, "l");
                assert_eq!(to, "g");
            }
            other => panic!("expected UnitMismatch, got {other:?}"),
        }

        let (quantity, _) = current_stock(&db, rice.id).await?;
        assert_eq!(quantity, 5000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_reserve_exact_remaining_stock_reaches_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let rice = create_test_ingredient(&db, "Rice", 5000.0, Unit::Gram).await?;

        reserve(&db, rice.id, 5.0, Unit::Kilogram).await?;

        let (quantity, _) = current_stock(&db, rice.id).await?;
        assert_eq!(quantity, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_current_stock_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = current_stock(&db, 42).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::IngredientNotFound { id: 42 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_low_stock_report() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_ingredient(&db, "Saffron", 5.0, Unit::Gram).await?;
        create_test_ingredient(&db, "Rice", 5000.0, Unit::Gram).await?;
        create_test_ingredient(&db, "Cardamom", 8.0, Unit::Gram).await?;

        let low = low_stock(&db, 10.0).await?;
        let names: Vec<&str> = low.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["cardamom", "saffron"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_stock_additions_since_filters_reservations() -> Result<()> {
        let db = setup_test_db().await?;
        let rice = create_test_ingredient(&db, "Rice", 5000.0, Unit::Gram).await?;
        reserve(&db, rice.id, 1.0, Unit::Kilogram).await?;

        let cutoff = Utc::now() - Duration::days(7);
        let additions = stock_additions_since(&db, cutoff).await?;

        assert_eq!(additions.len(), 1);
        assert_eq!(additions[0].delta, 5000.0);

        // Nothing added before a future cutoff
        let future = Utc::now() + Duration::days(1);
        assert!(stock_additions_since(&db, future).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_ingredient_by_name_is_normalized() -> Result<()> {
        let db = setup_test_db().await?;
        let rice = create_test_ingredient(&db, "Rice", 5000.0, Unit::Gram).await?;

        let found = get_ingredient_by_name(&db, "  RiCe  ").await?.unwrap();
        assert_eq!(found.id, rice.id);

        assert!(get_ingredient_by_name(&db, "basmathi").await?.is_none());

        Ok(())
    }
}
