//! Unit-of-measure table and conversion.
//!
//! Supported units partition into three families (mass, volume, count), each
//! with fixed linear multipliers against a base unit. Conversion is only
//! defined within a family; crossing families is a [`UnitMismatch`] error
//! carrying both labels. No rounding is performed here - rounding, if any,
//! is a presentation concern.
//!
//! [`UnitMismatch`]: crate::errors::Error::UnitMismatch

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A unit of measure, stored in the database by its short label.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Unit {
    /// Gram - base unit of the mass family
    #[sea_orm(string_value = "g")]
    Gram,
    /// Kilogram (1000 g)
    #[sea_orm(string_value = "kg")]
    Kilogram,
    /// Milliliter - base unit of the volume family
    #[sea_orm(string_value = "ml")]
    Milliliter,
    /// Liter (1000 ml)
    #[sea_orm(string_value = "l")]
    Liter,
    /// Piece ("nos") - base unit of the count family
    #[sea_orm(string_value = "nos")]
    Piece,
}

/// A group of units convertible into one another via fixed multipliers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnitFamily {
    /// Weight-based units (g, kg)
    Mass,
    /// Liquid units (ml, l)
    Volume,
    /// Discrete pieces (nos)
    Count,
}

impl Unit {
    /// The family this unit belongs to.
    #[must_use]
    pub const fn family(self) -> UnitFamily {
        match self {
            Self::Gram | Self::Kilogram => UnitFamily::Mass,
            Self::Milliliter | Self::Liter => UnitFamily::Volume,
            Self::Piece => UnitFamily::Count,
        }
    }

    /// Multiplier into the family's base unit.
    const fn base_factor(self) -> f64 {
        match self {
            Self::Gram | Self::Milliliter | Self::Piece => 1.0,
            Self::Kilogram | Self::Liter => 1000.0,
        }
    }

    /// The short label used in storage and diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Milliliter => "ml",
            Self::Liter => "l",
            Self::Piece => "nos",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "g" => Ok(Self::Gram),
            "kg" => Ok(Self::Kilogram),
            "ml" => Ok(Self::Milliliter),
            "l" => Ok(Self::Liter),
            "nos" => Ok(Self::Piece),
            other => Err(Error::validation(format!("unknown unit '{other}'"))),
        }
    }
}

/// Converts `quantity` from one unit to another within the same family.
///
/// The conversion is linear:
/// `result = quantity * (base_factor(from) / base_factor(to))`.
///
/// # Errors
/// Returns [`Error::UnitMismatch`] with both unit labels when the units
/// belong to different families.
pub fn convert(quantity: f64, from: Unit, to: Unit) -> Result<f64> {
    if from.family() != to.family() {
        return Err(Error::UnitMismatch {
            from: from.label().to_string(),
            to: to.label().to_string(),
        });
    }
    Ok(quantity * (from.base_factor() / to.base_factor()))
}
