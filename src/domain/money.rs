//! US dollar amounts held as integer cents.
//!
//! Stored and transmitted as two-place decimals, displayed in US locale
//! currency format (`$1,234.56`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Rounds to the nearest cent.
    ///
    /// ```
    /// use scoop_fund::domain::money::Money;
    /// assert_eq!(Money::from_decimal(3.50).cents(), 350);
    /// assert_eq!(Money::from_decimal(19.999).cents(), 2000);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    pub const fn cents(&self) -> i64 {
        self.cents
    }

    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// `self × percent / 100`, rounded half away from zero to the cent.
    pub fn percent(&self, percent: i64) -> Money {
        let scaled = self.cents * percent;
        let rounded = if scaled >= 0 {
            (scaled + 50) / 100
        } else {
            (scaled - 50) / 100
        };
        Money::from_cents(rounded)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::from_cents(self.cents + rhs.cents)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.cents += rhs.cents;
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money::from_cents(self.cents * i64::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let dollars = (abs / 100).to_string();

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        f.pad(&format!("{}${}.{:02}", sign, grouped, abs % 100))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // numeric columns may come back as JSON strings
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Money::from_decimal(n)),
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Money::from_decimal)
                .map_err(<D::Error as serde::de::Error>::custom),
        }
    }
}

/// Formats a decimal dollar amount the way the storefront displays it.
pub fn format_usd(amount: f64) -> String {
    Money::from_decimal(amount).to_string()
}
