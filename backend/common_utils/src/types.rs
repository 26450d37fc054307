//! Amount units and conversions for the gateway wire format.

use std::fmt::Display;

use error_stack::{report, ResultExt};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ParsingError, ValidationError};

/// A minor-unit amount carried as a digit string, the gateway wire
/// representation: no decimal point, no leading zeros.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringMinorUnit(String);

impl StringMinorUnit {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for StringMinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Conversion between caller-facing decimal major units and the amount
/// representation a gateway message carries.
pub trait AmountConvertor {
    type Output;

    fn convert(&self, amount: Decimal) -> CustomResult<Self::Output, ValidationError>;

    fn convert_back(&self, amount: &Self::Output) -> CustomResult<Decimal, ParsingError>;
}

/// Major-unit decimals become whole minor-unit strings (one major unit = 100
/// minor units). Fractions of a minor unit truncate toward zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringMinorUnitForGateway;

impl AmountConvertor for StringMinorUnitForGateway {
    type Output = StringMinorUnit;

    fn convert(&self, amount: Decimal) -> CustomResult<StringMinorUnit, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(report!(ValidationError::InvalidValue {
                message: "amount must be greater than zero".to_string(),
            }));
        }
        let minor_units = (amount * Decimal::from(100)).trunc();
        let minor_units = minor_units
            .to_i64()
            .ok_or_else(|| {
                report!(ValidationError::InvalidValue {
                    message: "amount out of range".to_string(),
                })
            })?;
        Ok(StringMinorUnit(minor_units.to_string()))
    }

    fn convert_back(&self, amount: &StringMinorUnit) -> CustomResult<Decimal, ParsingError> {
        let minor_units: i64 = amount.0.parse::<i64>().change_context(ParsingError)?;
        Ok(Decimal::new(minor_units, 2))
    }
}
