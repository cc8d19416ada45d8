//! Unified error types for the POS core.
//!
//! The order transaction recovers nothing locally: any failure aborts the
//! whole transaction and surfaces one specific, attributable error from this
//! enum. Translating these into user-facing messages or HTTP status codes is
//! the calling layer's job.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or incomplete request. The caller must change the input
    /// before retrying.
    #[error("validation failed: {message}")]
    Validation {
        /// What was wrong with the request
        message: String,
    },

    /// Configuration file or environment problem.
    #[error("configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// A referenced menu item does not exist.
    #[error("menu item {id} not found")]
    MenuItemNotFound {
        /// The missing menu item id
        id: i64,
    },

    /// A referenced order does not exist.
    #[error("order {id} not found")]
    OrderNotFound {
        /// The missing order id
        id: i64,
    },

    /// A referenced ingredient does not exist.
    #[error("ingredient {id} not found")]
    IngredientNotFound {
        /// The missing ingredient id
        id: i64,
    },

    /// A recipe unit and an ingredient's stored unit belong to different
    /// unit families. This is a data-setup bug, not a runtime condition.
    #[error("cannot convert {from} to {to}: incompatible unit families")]
    UnitMismatch {
        /// Label of the unit being converted from
        from: String,
        /// Label of the unit being converted to
        to: String,
    },

    /// Not enough stock to cover a reservation. A legitimate business
    /// condition: the order is rejected and inventory is left untouched.
    #[error(
        "not enough stock for {ingredient}: required {required} {unit}, available {available} {unit}"
    )]
    InsufficientStock {
        /// Name of the ingredient that ran short
        ingredient: String,
        /// Quantity required, in the ingredient's stored unit
        required: f64,
        /// Quantity available at the time of the check
        available: f64,
        /// The ingredient's stored unit label
        unit: String,
    },

    /// Lock timeout, busy database, or deadlock. Safe to retry the entire
    /// call; never resume mid-way.
    #[error("transient storage failure (safe to retry): {0}")]
    TransientStorage(String),

    /// Any other database error.
    #[error("database error: {0}")]
    Database(sea_orm::DbErr),

    /// I/O error (configuration files etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sea_orm::DbErr> for Error {
    fn from(err: sea_orm::DbErr) -> Self {
        // SQLite reports contention as "database is locked"/"database table is
        // locked"; other backends say "deadlock". All of these are retryable.
        let msg = err.to_string();
        let lowered = msg.to_lowercase();
        if lowered.contains("locked") || lowered.contains("deadlock") || lowered.contains("busy") {
            Self::TransientStorage(msg)
        } else {
            Self::Database(err)
        }
    }
}

impl Error {
    /// Shorthand for an [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
