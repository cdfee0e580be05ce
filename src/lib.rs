//! Bikram Samwat (B.S.) dates and their conversion to and from the Gregorian
//! (A.D.) calendar.
//!
//! B.S. month lengths change from year to year, so conversion is driven by a
//! table of month lengths covering B.S. 2000-2090 and anchored at a known
//! pair of equivalent dates. A.D. years 1944-2033 can be converted.

mod calendar;
mod consts;
mod convert;
mod names;
mod pattern;
mod prelude;

pub use calendar::{
    BS_YEAR_TO_MONTHS, FIRST_YEAR, LAST_YEAR, days_before_month, days_in_month, days_in_year,
    month_lengths,
};
pub use consts::*;
pub use convert::{Bound, Calendar, ConversionError, local_to_reference, reference_to_local};
pub use names::{Numerals, Script, month_from_name, month_name, to_devanagari};
pub use pattern::{
    CompiledPattern, DIRECTIVES, Directive, Field, Form, PatternCache, PatternError, compile,
    format, global_cache,
};

use chrono::{Local, NaiveDate, TimeDelta};
use once_cell::sync::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::prelude::*;

/// A Bikram Samwat date.
///
/// Built from a bare `(year, month, day)` triple without validation; the
/// triple is checked against the calendar table the first time the date is
/// converted. The A.D. equivalent is computed at most once and cached.
///
/// Two `Samwat`s compare by their triples. Comparison with a [`NaiveDate`]
/// goes through conversion: a date that cannot be converted is unequal to
/// every `NaiveDate` and unordered against it. Use [`Samwat::equivalent`] or
/// [`Samwat::difference`] to get the `ConversionError` instead.
#[derive(Clone, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct Samwat {
    year: i32,
    month: u32,
    day: u32,
    ad: OnceCell<NaiveDate>,
}

/// Crate level error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Conversion or validation against the calendar table failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Pattern compilation, matching or formatting failed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// `from_iso` input was not a valid `YYYY-MM-DD` B.S. date.
    #[error("Invalid ISO date {input:?}: {source}")]
    InvalidIso {
        input: String,
        #[source]
        source: Box<Error>,
    },
}

/// Anything with an A.D. equivalent.
pub trait AsGregorian {
    /// Returns the A.D. date this value denotes
    ///
    /// # Errors
    /// Returns `ConversionError` if the value cannot be converted.
    fn to_gregorian(&self) -> Result<NaiveDate, ConversionError>;
}

impl AsGregorian for NaiveDate {
    fn to_gregorian(&self) -> Result<NaiveDate, ConversionError> {
        Ok(*self)
    }
}

impl AsGregorian for Samwat {
    fn to_gregorian(&self) -> Result<NaiveDate, ConversionError> {
        self.equivalent()
    }
}

impl Samwat {
    /// Creates a date from a bare triple. No validation is performed.
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            ad: OnceCell::new(),
        }
    }

    /// Creates a date whose A.D. equivalent is already known
    pub fn with_equivalent(year: i32, month: u32, day: u32, ad: NaiveDate) -> Self {
        Self {
            year,
            month,
            day,
            ad: OnceCell::with_value(ad),
        }
    }

    /// Creates a date, validating it against the calendar table
    ///
    /// # Errors
    /// Returns `ConversionError::YearOutOfRange` if the year is not in the
    /// table, `InvalidMonth` for months outside 1-12 and `InvalidDay` for days
    /// past the end of the month.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ConversionError> {
        let max = calendar::days_in_month(year, month)?;
        if !(MIN_DAY..=max).contains(&day) {
            return Err(ConversionError::InvalidDay {
                year,
                month,
                day,
                max,
            });
        }
        Ok(Self::new(year, month, day))
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Returns `(year, month, day)`
    pub const fn to_triple(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    /// Returns the A.D. equivalent, converting and caching it on first use.
    ///
    /// # Errors
    /// Returns `ConversionError` if the date is outside the calendar table or
    /// does not exist. Failures are not cached.
    pub fn equivalent(&self) -> Result<NaiveDate, ConversionError> {
        self.ad
            .get_or_try_init(|| convert::local_to_reference(self))
            .copied()
    }

    /// The cached A.D. equivalent, if it has been computed
    pub fn cached_equivalent(&self) -> Option<NaiveDate> {
        self.ad.get().copied()
    }

    /// Returns a copy with the given fields replaced. `None` keeps the current value.
    ///
    /// The result is not validated.
    #[must_use]
    pub const fn with_fields(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Self {
        Self::new(
            match year {
                Some(year) => year,
                None => self.year,
            },
            match month {
                Some(month) => month,
                None => self.month,
            },
            match day {
                Some(day) => day,
                None => self.day,
            },
        )
    }

    /// Returns the date `delta` later (earlier if negative).
    ///
    /// # Errors
    /// Returns `ConversionError` if this date or the result cannot be converted.
    pub fn add_duration(&self, delta: TimeDelta) -> Result<Self, ConversionError> {
        let ad = self
            .equivalent()?
            .checked_add_signed(delta)
            .ok_or(ConversionError::Overflow)?;
        convert::reference_to_local(ad)
    }

    /// Returns the date `delta` earlier (later if negative).
    ///
    /// # Errors
    /// Returns `ConversionError` if this date or the result cannot be converted.
    pub fn subtract_duration(&self, delta: TimeDelta) -> Result<Self, ConversionError> {
        let ad = self
            .equivalent()?
            .checked_sub_signed(delta)
            .ok_or(ConversionError::Overflow)?;
        convert::reference_to_local(ad)
    }

    /// Returns `self - other` as a signed number of days.
    ///
    /// # Errors
    /// Returns `ConversionError` if either side cannot be converted.
    pub fn difference<T: AsGregorian + ?Sized>(
        &self,
        other: &T,
    ) -> Result<TimeDelta, ConversionError> {
        Ok(self.equivalent()?.signed_duration_since(other.to_gregorian()?))
    }

    /// Today's date in the local time zone
    ///
    /// # Errors
    /// Returns `ConversionError::YearOutOfRange` once the clock passes the
    /// supported A.D. range.
    pub fn today() -> Result<Self, ConversionError> {
        Self::from_reference(Local::now().date_naive())
    }

    /// Converts an A.D. date
    ///
    /// # Errors
    /// Returns `ConversionError::YearOutOfRange` if the year is outside the supported range.
    pub fn from_reference(date: NaiveDate) -> Result<Self, ConversionError> {
        convert::reference_to_local(date)
    }

    /// Parses `input` with a directive pattern, using the global pattern cache.
    ///
    /// # Errors
    /// Returns `Error::Pattern` if the pattern is invalid or does not match,
    /// and `Error::Conversion` if the parsed fields are not a valid B.S. date.
    pub fn parse(input: &str, pattern: &str) -> Result<Self, Error> {
        Self::parse_with(input, pattern, pattern::global_cache())
    }

    /// Same as [`Samwat::parse`] with an explicit pattern cache
    ///
    /// # Errors
    /// See [`Samwat::parse`].
    pub fn parse_with(input: &str, pattern: &str, cache: &PatternCache) -> Result<Self, Error> {
        let (year, month, day) = cache.get_or_compile(pattern)?.match_fields(input)?;
        Ok(Self::from_ymd(year, month, day)?)
    }

    /// Parses a `YYYY-MM-DD` B.S. date
    ///
    /// # Errors
    /// Returns `Error::InvalidIso` wrapping the underlying parse error.
    pub fn from_iso(input: &str) -> Result<Self, Error> {
        Self::parse(input, ISO_PATTERN).map_err(|source| Error::InvalidIso {
            input: input.to_owned(),
            source: Box::new(source),
        })
    }

    /// Formats this date with a directive pattern
    ///
    /// # Errors
    /// Returns `PatternError::UnknownDirective` for unknown directives and
    /// `PatternError::MonthOutOfRange` if a month name is requested for an
    /// invalid month.
    pub fn format(&self, pattern: &str) -> Result<String, PatternError> {
        pattern::format(self, pattern)
    }
}

impl fmt::Debug for Samwat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Samwat({}, {}, {})", self.year, self.month, self.day)
    }
}

impl PartialEq for Samwat {
    fn eq(&self, other: &Self) -> bool {
        self.to_triple() == other.to_triple()
    }
}

impl Eq for Samwat {}

impl Hash for Samwat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_triple().hash(state);
    }
}

impl PartialOrd for Samwat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Samwat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_triple().cmp(&other.to_triple())
    }
}

impl PartialEq<NaiveDate> for Samwat {
    fn eq(&self, other: &NaiveDate) -> bool {
        self.equivalent().is_ok_and(|ad| ad == *other)
    }
}

impl PartialEq<Samwat> for NaiveDate {
    fn eq(&self, other: &Samwat) -> bool {
        other == self
    }
}

impl PartialOrd<NaiveDate> for Samwat {
    fn partial_cmp(&self, other: &NaiveDate) -> Option<Ordering> {
        self.equivalent().ok().map(|ad| ad.cmp(other))
    }
}

impl PartialOrd<Samwat> for NaiveDate {
    fn partial_cmp(&self, other: &Samwat) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

impl TryFrom<NaiveDate> for Samwat {
    type Error = ConversionError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_reference(date)
    }
}

impl TryFrom<&Samwat> for NaiveDate {
    type Error = ConversionError;

    fn try_from(date: &Samwat) -> Result<Self, Self::Error> {
        date.equivalent()
    }
}

impl From<Samwat> for (i32, u32, u32) {
    fn from(date: Samwat) -> Self {
        date.to_triple()
    }
}

impl FromStr for Samwat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso(s.trim())
    }
}

impl serde::Serialize for Samwat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Samwat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
