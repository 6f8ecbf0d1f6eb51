//! Sensitive data categories

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of sensitive data assigned to a detected span.
///
/// Categories are mutually exclusive labels, not a hierarchy: a span carries
/// exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Personal name
    Name,

    /// Email address
    Email,

    /// Phone number
    Phone,

    /// Postal address
    Address,

    /// Generic identification number
    Id,

    /// Generic financial number (card-like digit groups)
    Financial,

    /// Health record reference
    Health,

    /// Anything else worth hiding (dates of birth by default)
    Other,

    /// Indian identity documents (PAN, Aadhaar)
    IndianId,

    /// Indian banking identifiers (IFSC, UPI handles, account numbers)
    IndianFinancial,

    /// Payment card number
    CreditCard,

    /// US Social Security Number
    Ssn,

    /// Passport number
    Passport,

    /// Driver's license number
    DriversLicense,

    /// Vehicle identification number
    Vin,

    /// IPv4 or IPv6 address
    IpAddress,

    /// Hardware MAC address
    MacAddress,

    /// Medical record number
    PatientId,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 18] = [
        Category::Name,
        Category::Email,
        Category::Phone,
        Category::Address,
        Category::Id,
        Category::Financial,
        Category::Health,
        Category::Other,
        Category::IndianId,
        Category::IndianFinancial,
        Category::CreditCard,
        Category::Ssn,
        Category::Passport,
        Category::DriversLicense,
        Category::Vin,
        Category::IpAddress,
        Category::MacAddress,
        Category::PatientId,
    ];

    /// Stable snake_case identifier, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Name => "name",
            Category::Email => "email",
            Category::Phone => "phone",
            Category::Address => "address",
            Category::Id => "id",
            Category::Financial => "financial",
            Category::Health => "health",
            Category::Other => "other",
            Category::IndianId => "indian_id",
            Category::IndianFinancial => "indian_financial",
            Category::CreditCard => "credit_card",
            Category::Ssn => "ssn",
            Category::Passport => "passport",
            Category::DriversLicense => "drivers_license",
            Category::Vin => "vin",
            Category::IpAddress => "ip_address",
            Category::MacAddress => "mac_address",
            Category::PatientId => "patient_id",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| Error::Config(format!("Unknown category: {}", s)))
    }
}

/// Number of spans per category.
///
/// Always holds an entry for every `Category`, so the sum of the values equals
/// the number of spans the counts were built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<Category, usize>);

impl CategoryCounts {
    /// All categories at zero
    pub fn new() -> Self {
        Self(Category::ALL.into_iter().map(|c| (c, 0)).collect())
    }

    pub fn increment(&mut self, category: Category) {
        *self.0.entry(category).or_insert(0) += 1;
    }

    /// Set the count of one category, replacing any previous value
    pub fn set(&mut self, category: Category, count: usize) {
        self.0.insert(category, count);
    }

    pub fn get(&self, category: Category) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Sum over all categories
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Iterate `(category, count)` pairs in category declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }

    /// Categories with a non-zero count
    pub fn present(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.iter().filter(|(_, n)| *n > 0)
    }
}

impl Default for CategoryCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Category> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut counts = Self::new();
        for category in iter {
            counts.increment(category);
        }
        counts
    }
}
