//! Dining table types.
//!
//! Tables belong to exactly one restaurant. Their number is unique within
//! that restaurant and their capacity bounds the party they can seat.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::restaurant::RestaurantId;

/// Store-generated identity of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(i64);

impl TableId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number printed on a table, unique within its restaurant.
///
/// # Examples
///
/// ```
/// use tablebook::TableNumber;
///
/// assert_eq!(TableNumber::try_from(12).unwrap().value(), 12);
/// assert!(TableNumber::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableNumber(u32);

impl TableNumber {
    /// Returns the underlying number.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TableNumber {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ValidationError::new("table_number", "must be positive"));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seating capacity of a table (1-100).
///
/// # Examples
///
/// ```
/// use tablebook::Capacity;
///
/// let four = Capacity::try_from(4).unwrap();
/// assert!(four.seats(4));
/// assert!(!four.seats(5));
/// assert!(Capacity::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(u8);

impl Capacity {
    /// The smallest valid capacity.
    pub const MIN: u8 = 1;

    /// The largest valid capacity.
    pub const MAX: u8 = 100;

    /// Returns the number of seats.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether a party of `guests` fits, including an exact fit.
    #[must_use]
    pub const fn seats(self, guests: u8) -> bool {
        self.0 >= guests
    }
}

impl TryFrom<u8> for Capacity {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::new(
                "capacity",
                format!("must be between {} and {}", Self::MIN, Self::MAX),
            ));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A table that has not been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTable {
    /// Owning restaurant.
    pub restaurant_id: RestaurantId,
    /// Table number.
    pub number: TableNumber,
    /// Seating capacity.
    pub capacity: Capacity,
}

impl NewTable {
    /// Creates a new table description.
    #[must_use]
    pub const fn new(restaurant_id: RestaurantId, number: TableNumber, capacity: Capacity) -> Self {
        Self {
            restaurant_id,
            number,
            capacity,
        }
    }
}

/// A stored table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    id: TableId,
    restaurant_id: RestaurantId,
    number: TableNumber,
    capacity: Capacity,
}

impl Table {
    pub(crate) const fn from_parts(
        id: TableId,
        restaurant_id: RestaurantId,
        number: TableNumber,
        capacity: Capacity,
    ) -> Self {
        Self {
            id,
            restaurant_id,
            number,
            capacity,
        }
    }

    /// Returns the id.
    #[must_use]
    pub const fn id(&self) -> TableId {
        self.id
    }

    /// Returns the owning restaurant.
    #[must_use]
    pub const fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    /// Returns the table number.
    #[must_use]
    pub const fn number(&self) -> TableNumber {
        self.number
    }

    /// Returns the seating capacity.
    #[must_use]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }
}
