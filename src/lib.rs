mod area;
mod checksum;
mod consts;
mod field;
mod pattern;
mod prelude;
mod types;

pub use area::{AreaConfig, AreaDirectory, AreaError, AreaTable, BUILTIN_PROVINCES, Region};
pub use checksum::check_code;
pub use consts::*;
pub use field::{Field, UnknownField};
pub use types::{Birthday, Gender, IdFormat};

use crate::prelude::*;
use chrono::{Local, NaiveDate};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::debug;

/// Rejection of an identity number at construction time.
/// Every variant carries the (uppercased) input.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "identity card {raw} is invalid: expected 15 or 18 characters, found {len}")]
    InvalidLength { raw: String, len: usize },
    #[display(fmt = "identity card {raw} is invalid: does not match the {format} format")]
    Malformed { raw: String, format: IdFormat },
    #[display(fmt = "identity card {raw} is invalid: check symbol should be {expected}")]
    ChecksumMismatch { raw: String, expected: char },
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// The rejected input
    pub fn raw(&self) -> &str {
        match self {
            Self::InvalidLength { raw, .. }
            | Self::Malformed { raw, .. }
            | Self::ChecksumMismatch { raw, .. } => raw,
        }
    }
}

/// Error type for accessors that can fail after construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Area(#[from] AreaError),

    /// The birth date digits do not name a real day (e.g. 02-30).
    #[error("Birthday {0} is not a calendar date")]
    ImpossibleDate(Birthday),

    #[error("Invalid date format: {0}")]
    DateFormat(String),
}

/// Province, city and county names of an identity number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaInfo {
    pub province: String,
    pub city: String,
    pub county: String,
}

/// A validated Chinese resident identity number.
///
/// Construction normalises the input to uppercase and checks the length,
/// the structural pattern and (for 18-character numbers) the check symbol.
/// A value of this type is therefore always valid. Derived fields are
/// computed on first access and memoized; region names come from the area
/// directory `D`, which is opened once, on the first name query.
pub struct IdentityNumber<D: AreaDirectory = AreaTable> {
    raw: String,
    format: IdFormat,
    config: D::Config,
    directory: OnceCell<D>,
    province: OnceCell<String>,
    city: OnceCell<String>,
    county: OnceCell<String>,
    birthday: OnceCell<Birthday>,
    gender: OnceCell<Gender>,
    age: OnceCell<i32>,
}

/// Runs the full validation pipeline on `raw`.
fn validate(raw: &str) -> Result<(String, IdFormat), ParseError> {
    let raw = raw.to_ascii_uppercase();
    let bytes = raw.as_bytes();

    let Some(format) = IdFormat::from_len(bytes.len()) else {
        let len = bytes.len();
        return Err(ParseError::InvalidLength { raw, len });
    };

    let well_formed = match format {
        IdFormat::Legacy => pattern::matches_legacy(bytes),
        IdFormat::Current => pattern::matches_current(bytes),
    };
    if !well_formed {
        return Err(ParseError::Malformed { raw, format });
    }

    if format == IdFormat::Current && !checksum::verify(bytes) {
        return match check_code(&bytes[..BODY_LEN]) {
            Some(expected) => Err(ParseError::ChecksumMismatch { raw, expected }),
            None => Err(ParseError::Malformed { raw, format }),
        };
    }

    Ok((raw, format))
}

impl IdentityNumber {
    /// Parses and validates `raw` using the default [`AreaTable`] directory.
    ///
    /// # Errors
    /// Returns `ParseError` if the length, the pattern or the check symbol is wrong.
    pub fn new(raw: &str) -> Result<Self, ParseError> {
        Self::with_config(raw, AreaConfig::default())
    }

    /// Predicate form of [`IdentityNumber::new`].
    pub fn is_valid(raw: &str) -> bool {
        validate(raw).is_ok()
    }
}

impl<D: AreaDirectory> IdentityNumber<D> {
    /// Parses `raw`; `config` is handed to `D::open` on the first name query.
    ///
    /// # Errors
    /// Returns `ParseError` if the length, the pattern or the check symbol is wrong.
    pub fn with_config(raw: &str, config: D::Config) -> Result<Self, ParseError> {
        let (raw, format) = validate(raw).inspect_err(|err| {
            debug!(raw = err.raw(), %err, "rejected identity number");
        })?;
        Ok(Self {
            raw,
            format,
            config,
            directory: OnceCell::new(),
            province: OnceCell::new(),
            city: OnceCell::new(),
            county: OnceCell::new(),
            birthday: OnceCell::new(),
            gender: OnceCell::new(),
            age: OnceCell::new(),
        })
    }

    /// Parses `raw` and uses an already opened directory for name queries.
    ///
    /// # Errors
    /// Returns `ParseError` if the length, the pattern or the check symbol is wrong.
    pub fn with_directory(raw: &str, directory: D) -> Result<Self, ParseError> {
        let mut id = Self::with_config(raw, D::Config::default())?;
        id.directory = OnceCell::with_value(directory);
        Ok(id)
    }

    /// The normalised number
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub const fn format(&self) -> IdFormat {
        self.format
    }

    pub fn province_code(&self) -> String {
        format!("{}{PROVINCE_SUFFIX}", &self.raw[..PROVINCE_PREFIX_LEN])
    }

    pub fn city_code(&self) -> String {
        format!("{}{CITY_SUFFIX}", &self.raw[..CITY_PREFIX_LEN])
    }

    pub fn county_code(&self) -> String {
        self.raw[..AREA_CODE_LEN].to_owned()
    }

    fn directory(&self) -> Result<&D, AreaError> {
        self.directory.get_or_try_init(|| D::open(&self.config))
    }

    fn region_name<'a>(
        &'a self,
        cell: &'a OnceCell<String>,
        code: &str,
    ) -> Result<&'a str, AreaError> {
        cell.get_or_try_init(|| {
            let region = self.directory()?.get(code)?;
            debug!(code, name = %region.name, "resolved region");
            Ok(region.name)
        })
        .map(String::as_str)
    }

    /// Province name.
    ///
    /// # Errors
    /// Returns `AreaError` if the directory cannot be opened or has no entry.
    pub fn province(&self) -> Result<&str, AreaError> {
        self.region_name(&self.province, &self.province_code())
    }

    /// City name.
    ///
    /// # Errors
    /// Returns `AreaError` if the directory cannot be opened or has no entry.
    pub fn city(&self) -> Result<&str, AreaError> {
        self.region_name(&self.city, &self.city_code())
    }

    /// County name.
    ///
    /// # Errors
    /// Returns `AreaError` if the directory cannot be opened or has no entry.
    pub fn county(&self) -> Result<&str, AreaError> {
        self.region_name(&self.county, &self.county_code())
    }

    /// All three region names.
    ///
    /// # Errors
    /// Returns the first `AreaError` hit by the three lookups.
    pub fn area_info(&self) -> Result<AreaInfo, AreaError> {
        Ok(AreaInfo {
            province: self.province()?.to_owned(),
            city: self.city()?.to_owned(),
            county: self.county()?.to_owned(),
        })
    }

    /// Province, city and county names joined by `separator`.
    ///
    /// # Errors
    /// Returns the first `AreaError` hit by the three lookups.
    pub fn area_string(&self, separator: &str) -> Result<String, AreaError> {
        Ok([self.province()?, self.city()?, self.county()?].join(separator))
    }

    /// Birth date digits; legacy numbers are placed in the 1900s.
    pub fn birthday(&self) -> Birthday {
        *self.birthday.get_or_init(|| {
            let bytes = self.raw.as_bytes();
            let mut digits = [0u8; BIRTHDAY_LEN_CURRENT];
            match self.format {
                IdFormat::Current => digits.copy_from_slice(
                    &bytes[BIRTHDAY_OFFSET..BIRTHDAY_OFFSET + BIRTHDAY_LEN_CURRENT],
                ),
                IdFormat::Legacy => {
                    digits[..2].copy_from_slice(LEGACY_CENTURY.as_bytes());
                    digits[2..].copy_from_slice(
                        &bytes[BIRTHDAY_OFFSET..BIRTHDAY_OFFSET + BIRTHDAY_LEN_LEGACY],
                    );
                }
            }
            Birthday::from_validated(digits)
        })
    }

    /// Birth date rendered with a chrono strftime pattern.
    ///
    /// # Errors
    /// Returns `Error::ImpossibleDate` for dates such as 02-31 and
    /// `Error::DateFormat` for an invalid pattern.
    pub fn birthday_formatted(&self, pattern: &str) -> Result<String, Error> {
        self.birthday().format(pattern)
    }

    /// Applies `f` to the raw `YYYYMMDD` birth date digits.
    pub fn birthday_with<T>(&self, f: impl FnOnce(&str) -> T) -> T {
        f(&self.birthday().digits())
    }

    pub fn gender(&self) -> Gender {
        *self.gender.get_or_init(|| {
            let digit = self.raw.as_bytes()[self.format.gender_index()];
            Gender::from_digit(digit - b'0')
        })
    }

    /// Age in whole years as of today's local date, fixed at first call.
    pub fn age(&self) -> i32 {
        *self
            .age
            .get_or_init(|| self.age_on(Local::now().date_naive()))
    }

    /// Age in whole years as of `today`; negative for future birthdays.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        self.birthday().age_on(today)
    }

    /// Reads a field by name, rendered as a string.
    ///
    /// # Errors
    /// Returns `Error::Area` for name fields whose lookup fails.
    pub fn field(&self, field: Field) -> Result<String, Error> {
        Ok(match field {
            Field::ProvinceCode => self.province_code(),
            Field::CityCode => self.city_code(),
            Field::CountyCode => self.county_code(),
            Field::Province => self.province()?.to_owned(),
            Field::City => self.city()?.to_owned(),
            Field::County => self.county()?.to_owned(),
            Field::Area => self.area_string("")?,
            Field::Birthday => self.birthday().to_string(),
            Field::Gender => self.gender().to_string(),
            Field::Age => self.age().to_string(),
        })
    }
}

impl<D> Clone for IdentityNumber<D>
where
    D: AreaDirectory + Clone,
    D::Config: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            format: self.format,
            config: self.config.clone(),
            directory: self.directory.clone(),
            province: self.province.clone(),
            city: self.city.clone(),
            county: self.county.clone(),
            birthday: self.birthday.clone(),
            gender: self.gender.clone(),
            age: self.age.clone(),
        }
    }
}

impl<D: AreaDirectory> fmt::Debug for IdentityNumber<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityNumber")
            .field("raw", &self.raw)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl<D: AreaDirectory> fmt::Display for IdentityNumber<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<D: AreaDirectory> AsRef<str> for IdentityNumber<D> {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl<D: AreaDirectory> PartialEq for IdentityNumber<D> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<D: AreaDirectory> Eq for IdentityNumber<D> {}

impl<D: AreaDirectory> Hash for IdentityNumber<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<D: AreaDirectory> FromStr for IdentityNumber<D> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::with_config(s, D::Config::default())
    }
}

impl<D: AreaDirectory> TryFrom<&str> for IdentityNumber<D> {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl<D: AreaDirectory> Serialize for IdentityNumber<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, D: AreaDirectory> Deserialize<'de> for IdentityNumber<D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
