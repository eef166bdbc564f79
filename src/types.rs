use crate::consts::{CURRENT_LEN, LEGACY_LEN};
use crate::{Error, prelude::*};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// The two generations of identity number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFormat {
    /// 15 digits, two-digit year in the 1900s, no check symbol
    #[display(fmt = "legacy")]
    Legacy,
    /// 18 characters, four-digit year, trailing check symbol
    #[display(fmt = "current")]
    Current,
}

impl IdFormat {
    /// Picks the format implied by an input length.
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            LEGACY_LEN => Some(Self::Legacy),
            CURRENT_LEN => Some(Self::Current),
            _ => None,
        }
    }

    /// Number of characters in this format
    pub const fn len(self) -> usize {
        match self {
            Self::Legacy => LEGACY_LEN,
            Self::Current => CURRENT_LEN,
        }
    }

    /// Index of the digit whose parity encodes gender: the last digit of
    /// legacy numbers, the one before the check symbol in current numbers
    pub(crate) const fn gender_index(self) -> usize {
        match self {
            Self::Legacy => LEGACY_LEN - 1,
            Self::Current => CURRENT_LEN - 2,
        }
    }
}

/// Gender encoded by the parity of the sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Gender {
    #[display(fmt = "F")]
    #[serde(rename = "F")]
    Female,
    #[display(fmt = "M")]
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    /// Even digits are female, odd digits are male.
    pub const fn from_digit(digit: u8) -> Self {
        if digit % 2 == 0 { Self::Female } else { Self::Male }
    }

    pub const fn is_male(self) -> bool {
        matches!(self, Self::Male)
    }

    pub const fn is_female(self) -> bool {
        matches!(self, Self::Female)
    }
}

/// Birth date as written in the number.
///
/// The digits have only passed the structural check (month `01..=12`,
/// day `01..=31`), so a value such as 1990-02-31 can exist here. Use
/// [`Birthday::to_naive_date`] when a real calendar date is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct Birthday {
    year: u16,
    month: u8,
    day: u8,
}

impl Birthday {
    /// Builds a birthday from eight ASCII digits (`YYYYMMDD`).
    pub fn from_digits(digits: &[u8]) -> Option<Self> {
        let digits: [u8; 8] = digits.try_into().ok()?;
        digits
            .iter()
            .all(u8::is_ascii_digit)
            .then(|| Self::from_validated(digits))
    }

    /// Same as `from_digits` for input already known to be digits.
    pub(crate) fn from_validated(digits: [u8; 8]) -> Self {
        let digit = |i: usize| digits[i] - b'0';
        Self {
            year: u16::from(digit(0)) * 1000
                + u16::from(digit(1)) * 100
                + u16::from(digit(2)) * 10
                + u16::from(digit(3)),
            month: digit(4) * 10 + digit(5),
            day: digit(6) * 10 + digit(7),
        }
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// The raw `YYYYMMDD` digits
    pub fn digits(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }

    /// Returns the calendar date, or `None` for impossible dates like 02-30.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }

    /// Renders the birthday with a chrono strftime pattern.
    ///
    /// # Errors
    /// Returns `Error::ImpossibleDate` if the digits are not a calendar date,
    /// and `Error::DateFormat` if `pattern` is not a valid strftime pattern.
    pub fn format(&self, pattern: &str) -> Result<String, Error> {
        let date = self.to_naive_date().ok_or(Error::ImpossibleDate(*self))?;
        let mut out = String::new();
        write!(out, "{}", date.format(pattern))
            .map_err(|_| Error::DateFormat(pattern.to_owned()))?;
        Ok(out)
    }

    /// Whole years between this birthday and `today`.
    ///
    /// A year is counted once the month/day anniversary is reached. The
    /// result is negative when the birthday lies after `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let born = (i32::from(self.year), u32::from(self.month), u32::from(self.day));
        let now = (today.year(), today.month(), today.day());
        if born <= now {
            let years = now.0 - born.0;
            if (now.1, now.2) < (born.1, born.2) { years - 1 } else { years }
        } else {
            let years = born.0 - now.0;
            let full = if (born.1, born.2) < (now.1, now.2) { years - 1 } else { years };
            -full
        }
    }
}

impl Serialize for Birthday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
