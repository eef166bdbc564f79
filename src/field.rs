use crate::prelude::*;
use std::str::FromStr;

/// Every field that can be read off an [`IdentityNumber`](crate::IdentityNumber) by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "province_code")]
    ProvinceCode,
    #[display(fmt = "city_code")]
    CityCode,
    #[display(fmt = "county_code")]
    CountyCode,
    #[display(fmt = "province")]
    Province,
    #[display(fmt = "city")]
    City,
    #[display(fmt = "county")]
    County,
    #[display(fmt = "area")]
    Area,
    #[display(fmt = "birthday")]
    Birthday,
    #[display(fmt = "gender")]
    Gender,
    #[display(fmt = "age")]
    Age,
}

impl Field {
    pub const ALL: [Self; 10] = [
        Self::ProvinceCode,
        Self::CityCode,
        Self::CountyCode,
        Self::Province,
        Self::City,
        Self::County,
        Self::Area,
        Self::Birthday,
        Self::Gender,
        Self::Age,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.to_string() == name)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.to_string().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn test_unknown_field() {
        let err = "number".parse::<Field>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown field: number");
        assert!("Province".parse::<Field>().is_err());
    }
}
