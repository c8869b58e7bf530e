//! Short IDs - human-readable, prefixed, zero-padded identifiers.
//!
//! A `ShortIdFormat` describes one entity's scheme. Formatting is pure and
//! `parse` inverts it, so the numeric sequence value can always be recovered
//! from an existing ID:
//!
//! | Entity   | Format                     | Example         |
//! |----------|----------------------------|-----------------|
//! | Branch   | `PAI` + 3 digits           | `PAI007`        |
//! | Customer | year + `CUST` + 5 digits   | `2024CUST00001` |
//! | Order    | `ORD-` + 4 digits          | `ORD-0001`      |
//! | Product  | `PROD-` + 4 digits         | `PROD-0001`     |
//!
//! Values wider than the pad width are written in full, never truncated.

use thiserror::Error;

/// Number of characters of a year prefix.
const YEAR_WIDTH: usize = 4;

/// Errors from parsing a short ID back into its sequence value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortIdParseError {
    #[error("short id {short_id:?} does not start with a four-digit year")]
    MissingYear { short_id: String },
    #[error("short id {short_id:?} does not carry the prefix {expected:?}")]
    PrefixMismatch {
        short_id: String,
        expected: &'static str,
    },
    #[error("short id {short_id:?} has no numeric suffix")]
    MissingDigits { short_id: String },
    #[error("short id {short_id:?} has a non-numeric suffix")]
    NonNumeric { short_id: String },
    #[error("short id {short_id:?} exceeds the counter range")]
    Overflow { short_id: String },
}

/// Zero-pad `value` to `width` digits behind `prefix`, optionally led by a year.
///
/// ```
/// use retail_ids::format_short_id;
///
/// assert_eq!(format_short_id("PAI", 7, 3, None), "PAI007");
/// assert_eq!(format_short_id("CUST", 1, 5, Some(2024)), "2024CUST00001");
/// assert_eq!(format_short_id("ORD-", 12345, 4, None), "ORD-12345");
/// ```
pub fn format_short_id(prefix: &str, value: u64, width: usize, year: Option<i32>) -> String {
    match year {
        Some(year) => format!("{year:04}{prefix}{value:0width$}"),
        None => format!("{prefix}{value:0width$}"),
    }
}

/// The short-ID scheme of one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortIdFormat {
    prefix: &'static str,
    width: usize,
    year: bool,
}

impl ShortIdFormat {
    /// `PAI007`
    pub const BRANCH: Self = Self::new("PAI", 3);
    /// `2024CUST00001`
    pub const CUSTOMER: Self = Self::new("CUST", 5).with_year();
    /// `ORD-0001`
    pub const ORDER: Self = Self::new("ORD-", 4);
    /// `PROD-0001`
    pub const PRODUCT: Self = Self::new("PROD-", 4);

    pub const fn new(prefix: &'static str, width: usize) -> Self {
        Self {
            prefix,
            width,
            year: false,
        }
    }

    /// Lead every ID with the four-digit year current at format time.
    pub const fn with_year(self) -> Self {
        Self { year: true, ..self }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn has_year(&self) -> bool {
        self.year
    }

    /// Format a sequence value. `year` is ignored by formats without a year prefix.
    pub fn format(&self, value: u64, year: i32) -> String {
        format_short_id(self.prefix, value, self.width, self.year.then_some(year))
    }

    /// Recover the sequence value encoded in `short_id`.
    ///
    /// Accepts any number of digits after the prefix, so IDs that outgrew the
    /// pad width still parse.
    pub fn parse(&self, short_id: &str) -> Result<u64, ShortIdParseError> {
        let rest = if self.year {
            let year = short_id
                .get(..YEAR_WIDTH)
                .filter(|year| year.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| ShortIdParseError::MissingYear {
                    short_id: short_id.to_string(),
                })?;
            &short_id[year.len()..]
        } else {
            short_id
        };

        let digits = rest
            .strip_prefix(self.prefix)
            .ok_or_else(|| ShortIdParseError::PrefixMismatch {
                short_id: short_id.to_string(),
                expected: self.prefix,
            })?;

        if digits.is_empty() {
            return Err(ShortIdParseError::MissingDigits {
                short_id: short_id.to_string(),
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ShortIdParseError::NonNumeric {
                short_id: short_id.to_string(),
            });
        }

        digits.parse().map_err(|_| ShortIdParseError::Overflow {
            short_id: short_id.to_string(),
        })
    }
}
