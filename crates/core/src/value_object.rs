//! Value objects: equality by value, not identity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Amount of money in the catalog's whole currency unit (e.g. pesos).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// A strictly positive amount (unit prices).
    pub fn positive(amount: u64) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(Self(amount))
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::validation("amount overflow"))
    }

    /// `self × quantity`, failing instead of wrapping.
    pub fn checked_times(self, quantity: Quantity) -> DomainResult<Money> {
        self.0
            .checked_mul(u64::from(quantity.get()))
            .map(Money)
            .ok_or_else(|| DomainError::validation("amount overflow"))
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Count of sold units: always at least one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl ValueObject for Quantity {}

impl TryFrom<u32> for Quantity {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
