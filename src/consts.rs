/// Length of a legacy (first generation) identity number
pub const LEGACY_LEN: usize = 15;

/// Length of a current (second generation) identity number
pub const CURRENT_LEN: usize = 18;

/// Number of body digits covered by the check symbol
pub const BODY_LEN: usize = 17;

/// Length of the full administrative division code
pub const AREA_CODE_LEN: usize = 6;

/// Digits of the area code that identify the province
pub const PROVINCE_PREFIX_LEN: usize = 2;
/// Digits of the area code that identify the city
pub const CITY_PREFIX_LEN: usize = 4;

/// Padding appended to a province prefix to form a full code
pub const PROVINCE_SUFFIX: &str = "0000";
/// Padding appended to a city prefix to form a full code
pub const CITY_SUFFIX: &str = "00";

/// Birth date starts right after the area code in both formats
pub const BIRTHDAY_OFFSET: usize = AREA_CODE_LEN;
/// Birth date digits in current numbers (YYYYMMDD)
pub const BIRTHDAY_LEN_CURRENT: usize = 8;
/// Birth date digits in legacy numbers (YYMMDD)
pub const BIRTHDAY_LEN_LEGACY: usize = 6;

/// Century implied by every legacy number
pub const LEGACY_CENTURY: &str = "19";

/// Year prefixes accepted in current numbers
pub const CENTURY_PREFIXES: [&[u8; 2]; 3] = [b"18", b"19", b"20"];

/// Weight applied to each body digit, left to right (ISO 7064 MOD 11-2)
pub const WEIGHTS: [u32; BODY_LEN] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];

/// Check symbol indexed by `weighted_sum % CHECKSUM_MODULUS`
pub const CHECK_CODES: [char; 11] = ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];

/// Modulus of the weighted checksum
pub const CHECKSUM_MODULUS: u32 = 11;

/// Check symbol standing for the value ten
pub const CHECK_CODE_TEN: u8 = b'X';
