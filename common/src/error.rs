//! Error types for building the currency registry.

use thiserror::Error;

/// Errors raised while registering currencies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Code is empty, too long or contains characters other than `A-Z0-9`.
    #[error("Invalid currency code: {0:?}")]
    InvalidCode(String),

    /// Code is already registered.
    #[error("Currency already registered: {0}")]
    Duplicate(String),

    /// More minor units than a decimal can carry.
    #[error("Currency {code} has {minor_units} minor units, at most {max} supported")]
    TooManyMinorUnits {
        code: String,
        minor_units: u32,
        max: u32,
    },
}
