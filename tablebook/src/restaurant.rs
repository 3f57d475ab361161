//! Restaurant types: identity, operating hours and postal address.
//!
//! Restaurants are built with [`Restaurant::builder`], which validates every
//! field and yields a [`NewRestaurant`] ready to be stored. The store hands
//! back a [`Restaurant`] carrying its generated id.

use std::fmt;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of a restaurant name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Lowest accepted zip code.
pub const MIN_ZIP_CODE: u32 = 10_000;

/// Highest accepted zip code.
pub const MAX_ZIP_CODE: u32 = 99_999;

/// Storage format of opening and closing times.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Store-generated identity of a restaurant.
///
/// # Examples
///
/// ```
/// use tablebook::RestaurantId;
///
/// let id = RestaurantId::new(3);
/// assert_eq!(id.value(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(i64);

impl RestaurantId {
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

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Daily opening window of a restaurant, inclusive at both ends.
///
/// Overnight windows (closing before opening) are rejected.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use tablebook::OperatingHours;
///
/// let hours = OperatingHours::new(
///     NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
/// ).unwrap();
///
/// assert!(hours.contains(NaiveTime::from_hms_opt(11, 0, 0).unwrap()));
/// assert!(hours.contains(NaiveTime::from_hms_opt(22, 0, 0).unwrap()));
/// assert!(!hours.contains(NaiveTime::from_hms_opt(22, 1, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    opening: NaiveTime,
    closing: NaiveTime,
}

impl OperatingHours {
    /// Creates an opening window.
    ///
    /// # Errors
    ///
    /// Returns an error if `closing` is earlier than `opening`.
    pub fn new(opening: NaiveTime, closing: NaiveTime) -> Result<Self, ValidationError> {
        if closing < opening {
            return Err(ValidationError::new(
                "closing_time",
                format!("closing time {closing} is before opening time {opening}"),
            ));
        }
        Ok(Self { opening, closing })
    }

    /// Returns the opening time.
    #[must_use]
    pub const fn opening(&self) -> NaiveTime {
        self.opening
    }

    /// Returns the closing time.
    #[must_use]
    pub const fn closing(&self) -> NaiveTime {
        self.closing
    }

    /// Whether a time of day falls inside the window, boundaries included.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.opening && time <= self.closing
    }
}

impl fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.opening.format("%H:%M"),
            self.closing.format("%H:%M")
        )
    }
}

/// Postal address of a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    zip_code: u32,
    city: String,
    country: String,
}

impl Address {
    /// Creates a validated address.
    ///
    /// Text fields are trimmed and must be non-empty; the zip code must be a
    /// five digit number.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::Address;
    ///
    /// assert!(Address::new("Main St 1", 10115, "Berlin", "DE").is_ok());
    /// assert!(Address::new("Main St 1", 999, "Berlin", "DE").is_err());
    /// ```
    pub fn new(
        street: impl Into<String>,
        zip_code: u32,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let street = required_text("street", street.into())?;
        let city = required_text("city", city.into())?;
        let country = required_text("country", country.into())?;

        if !(MIN_ZIP_CODE..=MAX_ZIP_CODE).contains(&zip_code) {
            return Err(ValidationError::new(
                "zip_code",
                format!("must be between {MIN_ZIP_CODE} and {MAX_ZIP_CODE}"),
            ));
        }

        Ok(Self {
            street,
            zip_code,
            city,
            country,
        })
    }

    /// Returns the street line.
    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Returns the zip code.
    #[must_use]
    pub const fn zip_code(&self) -> u32 {
        self.zip_code
    }

    /// Returns the city.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the country.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} {}, {}",
            self.street, self.zip_code, self.city, self.country
        )
    }
}

fn required_text(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            "must be non-empty after trimming whitespace",
        ));
    }
    Ok(trimmed.to_string())
}

/// A validated restaurant that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub(crate) name: String,
    pub(crate) hours: OperatingHours,
    pub(crate) address: Option<Address>,
}

impl NewRestaurant {
    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the opening window.
    #[must_use]
    pub const fn hours(&self) -> OperatingHours {
        self.hours
    }

    /// Returns the address, if any.
    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }
}

/// A stored restaurant.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use tablebook::{OperatingHours, Restaurant};
///
/// let hours = OperatingHours::new(
///     NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
/// ).unwrap();
///
/// let draft = Restaurant::builder("Trattoria", hours).build().unwrap();
/// assert_eq!(draft.name(), "Trattoria");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    id: RestaurantId,
    name: String,
    hours: OperatingHours,
    address: Option<Address>,
    created_at: DateTime<Utc>,
}

impl Restaurant {
    /// Starts building a new restaurant.
    #[must_use]
    pub fn builder(name: impl Into<String>, hours: OperatingHours) -> RestaurantBuilder {
        RestaurantBuilder {
            name: name.into(),
            hours,
            address: None,
        }
    }

    pub(crate) fn from_parts(
        id: RestaurantId,
        draft: NewRestaurant,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            hours: draft.hours,
            address: draft.address,
            created_at,
        }
    }

    /// Returns the id.
    #[must_use]
    pub const fn id(&self) -> RestaurantId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the opening window.
    #[must_use]
    pub const fn hours(&self) -> OperatingHours {
        self.hours
    }

    /// Returns the address, if any.
    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Returns when the restaurant was registered.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Builder for [`NewRestaurant`] values.
#[derive(Debug)]
pub struct RestaurantBuilder {
    name: String,
    hours: OperatingHours,
    address: Option<Address>,
}

impl RestaurantBuilder {
    /// Sets the postal address.
    #[must_use]
    pub fn address(mut self, address: Option<Address>) -> Self {
        self.address = address;
        self
    }

    /// Validates and builds the restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or longer than
    /// [`MAX_NAME_LEN`] characters.
    pub fn build(self) -> Result<NewRestaurant, ValidationError> {
        let name = required_text("name", self.name)?;
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::new(
                "name",
                format!("cannot exceed {MAX_NAME_LEN} characters"),
            ));
        }

        Ok(NewRestaurant {
            name,
            hours: self.hours,
            address: self.address,
        })
    }
}
