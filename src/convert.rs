//! Conversion between A.D. (Gregorian) and B.S. (Bikram Samwat) dates.
//!
//! Both directions count days from a fixed epoch anchor, [`EPOCH_AD`] and
//! [`EPOCH_BS`], which name the same day. The anchor precedes every date the
//! converter accepts, so day offsets from it are never negative.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate, TimeDelta};
use log::trace;

use crate::calendar;
use crate::consts::{AD_FIRST_YEAR, AD_LAST_YEAR, BAISAKH, CHAITRA, EPOCH_AD, EPOCH_BS, MIN_DAY};
use crate::prelude::*;
use crate::Samwat;

/// The calendar a value or a limit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Calendar {
    #[display(fmt = "A.D.")]
    Gregorian,
    #[display(fmt = "B.S.")]
    BikramSamwat,
}

/// Which end of a supported range was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Bound {
    #[display(fmt = "below")]
    Lower,
    #[display(fmt = "above")]
    Upper,
}

/// Error type for calendar conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Year not covered by the conversion tables.
    #[error("{calendar} year {year} is {bound} the supported range {min}-{max}")]
    YearOutOfRange {
        calendar: Calendar,
        bound: Bound,
        year: i32,
        min: i32,
        max: i32,
    },

    /// Month outside 1-12.
    #[error("Invalid month {month} for B.S. year {year} (must be 1-12)")]
    InvalidMonth { year: i32, month: u32 },

    /// Day outside the length of its month.
    #[error("Invalid day {day} for B.S. {year}-{month:02} (must be 1-{max})")]
    InvalidDay {
        year: i32,
        month: u32,
        day: u32,
        max: u32,
    },

    /// B.S. date earlier than the epoch anchor.
    #[error("B.S. date {year}-{month:02}-{day:02} is before the epoch anchor")]
    BeforeEpoch { year: i32, month: u32, day: u32 },

    /// A.D. date arithmetic left chrono's representable range.
    #[error("A.D. date arithmetic overflowed")]
    Overflow,
}

const fn ad_out_of_range(year: i32, bound: Bound) -> ConversionError {
    ConversionError::YearOutOfRange {
        calendar: Calendar::Gregorian,
        bound,
        year,
        min: AD_FIRST_YEAR,
        max: AD_LAST_YEAR,
    }
}

/// Converts an A.D. date to its B.S. equivalent.
///
/// The returned [`Samwat`] carries `date` as its cached equivalent.
///
/// # Errors
/// Returns `ConversionError::YearOutOfRange` if the year of `date` is outside
/// `AD_FIRST_YEAR..=AD_LAST_YEAR`.
pub fn reference_to_local(date: NaiveDate) -> Result<Samwat, ConversionError> {
    let ad_year = date.year();
    if ad_year < AD_FIRST_YEAR {
        return Err(ad_out_of_range(ad_year, Bound::Lower));
    }
    if ad_year > AD_LAST_YEAR {
        return Err(ad_out_of_range(ad_year, Bound::Upper));
    }

    let (mut year, mut month, epoch_day) = EPOCH_BS;
    let mut day = i64::from(epoch_day) + date.signed_duration_since(EPOCH_AD).num_days();

    loop {
        let length = i64::from(calendar::days_in_month(year, month)?);
        if day <= length {
            break;
        }
        day -= length;
        if month == CHAITRA {
            month = BAISAKH;
            year += 1;
        } else {
            month += 1;
        }
    }

    let day = u32::try_from(day).map_err(|_| ConversionError::Overflow)?;
    trace!("converted A.D. {date} to B.S. {year}-{month:02}-{day:02}");
    Ok(Samwat::with_equivalent(year, month, day, date))
}

/// Converts a B.S. date to its A.D. equivalent.
///
/// This is where a `Samwat` built from a bare triple gets validated.
///
/// # Errors
/// Returns `ConversionError::YearOutOfRange` if the year is outside the
/// calendar table, `InvalidMonth`/`InvalidDay` for fields that do not exist in
/// that year, and `BeforeEpoch` for dates earlier than the anchor.
pub fn local_to_reference(date: &Samwat) -> Result<NaiveDate, ConversionError> {
    let (year, month, day) = date.to_triple();
    let max = calendar::days_in_month(year, month)?;
    if !(MIN_DAY..=max).contains(&day) {
        return Err(ConversionError::InvalidDay {
            year,
            month,
            day,
            max,
        });
    }

    let (epoch_year, epoch_month, epoch_day) = EPOCH_BS;
    let epoch_ordinal = calendar::days_before_month(epoch_year, epoch_month)? + epoch_day;
    let mut days = i64::from(calendar::days_before_month(year, month)? + day);

    match year.cmp(&epoch_year) {
        Ordering::Less => return Err(ConversionError::BeforeEpoch { year, month, day }),
        Ordering::Equal => {
            days -= i64::from(epoch_ordinal);
            if days < 0 {
                return Err(ConversionError::BeforeEpoch { year, month, day });
            }
        }
        Ordering::Greater => {
            for full_year in (epoch_year + 1..year).rev() {
                days += i64::from(calendar::days_in_year(full_year)?);
            }
            days += i64::from(calendar::days_in_year(epoch_year)? - epoch_ordinal);
        }
    }

    let ad = EPOCH_AD
        .checked_add_signed(TimeDelta::days(days))
        .ok_or(ConversionError::Overflow)?;
    trace!("converted B.S. {year}-{month:02}-{day:02} to A.D. {ad}");
    Ok(ad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    struct TestCase {
        ad: (i32, u32, u32),
        bs: (i32, u32, u32),
    }

    const KNOWN_DATES: [TestCase; 10] = [
        TestCase {
            ad: (2016, 11, 13),
            bs: (2073, 7, 28),
        },
        TestCase {
            ad: (2018, 3, 14),
            bs: (2074, 11, 30),
        },
        TestCase {
            ad: (2015, 10, 22),
            bs: (2072, 7, 5),
        },
        TestCase {
            ad: (2014, 9, 30),
            bs: (2071, 6, 14),
        },
        TestCase {
            ad: (1995, 9, 17),
            bs: (2052, 6, 1),
        },
        TestCase {
            ad: (2000, 4, 13),
            bs: (2057, 1, 1),
        },
        TestCase {
            ad: (2023, 4, 14),
            bs: (2080, 1, 1),
        },
        TestCase {
            ad: (2024, 4, 13),
            bs: (2081, 1, 1),
        },
        TestCase {
            ad: (2019, 4, 17),
            bs: (2076, 1, 4),
        },
        TestCase {
            ad: (2033, 12, 31),
            bs: (2090, 9, 16),
        },
    ];

    #[test]
    fn test_reference_to_local_known_dates() {
        for case in &KNOWN_DATES {
            let (y, m, d) = case.ad;
            let bs = reference_to_local(ad(y, m, d)).unwrap();
            assert_eq!(bs.to_triple(), case.bs, "A.D. {:?}", case.ad);
        }
    }

    #[test]
    fn test_local_to_reference_known_dates() {
        for case in &KNOWN_DATES {
            let (y, m, d) = case.bs;
            let converted = local_to_reference(&Samwat::new(y, m, d)).unwrap();
            assert_eq!(converted, ad(case.ad.0, case.ad.1, case.ad.2), "B.S. {:?}", case.bs);
        }
    }

    #[test]
    fn test_anchor_fixpoint() {
        let (y, m, d) = EPOCH_BS;
        assert_eq!(reference_to_local(EPOCH_AD).unwrap().to_triple(), EPOCH_BS);
        assert_eq!(local_to_reference(&Samwat::new(y, m, d)).unwrap(), EPOCH_AD);
    }

    #[test]
    fn test_anchor_year_after_anchor_day() {
        // 2000-09-17 is the anchor, 2000 Poush has 29 days
        assert_eq!(local_to_reference(&Samwat::new(2000, 9, 29)).unwrap(), ad(1944, 1, 13));
        assert_eq!(local_to_reference(&Samwat::new(2000, 10, 1)).unwrap(), ad(1944, 1, 14));
        assert_eq!(local_to_reference(&Samwat::new(2000, 12, 31)).unwrap(), ad(1944, 4, 12));
        assert_eq!(local_to_reference(&Samwat::new(2001, 1, 1)).unwrap(), ad(1944, 4, 13));
    }

    #[test]
    fn test_round_trip_whole_range() {
        let mut previous: Option<Samwat> = None;
        for date in EPOCH_AD.iter_days().take_while(|d| d.year() <= AD_LAST_YEAR) {
            let bs = reference_to_local(date).unwrap();
            let fresh = Samwat::new(bs.year(), bs.month(), bs.day());
            assert_eq!(local_to_reference(&fresh).unwrap(), date, "B.S. {bs}");
            assert_eq!(reference_to_local(local_to_reference(&fresh).unwrap()).unwrap(), fresh);
            if let Some(prev) = previous {
                assert!(prev < bs, "{prev} should precede {bs}");
            }
            previous = Some(bs);
        }
    }

    #[test]
    fn test_year_end_rolls_over() {
        // 2079 Chaitra has 30 days
        let last = local_to_reference(&Samwat::new(2079, 12, 30)).unwrap();
        assert_eq!(last, ad(2023, 4, 13));
        let next = reference_to_local(last.succ_opt().unwrap()).unwrap();
        assert_eq!(next.to_triple(), (2080, 1, 1));
    }

    #[test]
    fn test_converted_date_caches_equivalent() {
        let date = ad(2016, 11, 13);
        let bs = reference_to_local(date).unwrap();
        assert_eq!(bs.cached_equivalent(), Some(date));
    }

    #[test]
    fn test_ad_year_below_range() {
        let result = reference_to_local(ad(1943, 12, 31));
        assert!(matches!(
            result,
            Err(ConversionError::YearOutOfRange {
                calendar: Calendar::Gregorian,
                bound: Bound::Lower,
                year: 1943,
                ..
            })
        ));
    }

    #[test]
    fn test_ad_year_above_range() {
        let result = reference_to_local(ad(2034, 1, 1));
        assert!(matches!(
            result,
            Err(ConversionError::YearOutOfRange {
                calendar: Calendar::Gregorian,
                bound: Bound::Upper,
                year: 2034,
                ..
            })
        ));
        assert_eq!(
            result.unwrap_err().to_string(),
            "A.D. year 2034 is above the supported range 1944-2033"
        );
    }

    #[test]
    fn test_bs_year_out_of_range() {
        let below = local_to_reference(&Samwat::new(1999, 1, 1));
        assert!(matches!(
            below,
            Err(ConversionError::YearOutOfRange {
                calendar: Calendar::BikramSamwat,
                bound: Bound::Lower,
                ..
            })
        ));

        let above = local_to_reference(&Samwat::new(2091, 1, 1));
        assert!(matches!(
            above,
            Err(ConversionError::YearOutOfRange {
                calendar: Calendar::BikramSamwat,
                bound: Bound::Upper,
                ..
            })
        ));
        assert_eq!(
            above.unwrap_err().to_string(),
            "B.S. year 2091 is above the supported range 2000-2090"
        );
    }

    #[test]
    fn test_before_epoch() {
        let result = local_to_reference(&Samwat::new(2000, 9, 16));
        assert!(matches!(
            result,
            Err(ConversionError::BeforeEpoch { year: 2000, month: 9, day: 16 })
        ));
        assert!(local_to_reference(&Samwat::new(2000, 1, 1)).is_err());
    }

    #[test]
    fn test_invalid_day() {
        // 2073 Kartik has 30 days
        let result = local_to_reference(&Samwat::new(2073, 7, 31));
        assert!(matches!(
            result,
            Err(ConversionError::InvalidDay { year: 2073, month: 7, day: 31, max: 30 })
        ));

        let result = local_to_reference(&Samwat::new(2073, 7, 0));
        assert!(matches!(result, Err(ConversionError::InvalidDay { day: 0, .. })));
    }

    #[test]
    fn test_invalid_month() {
        let result = local_to_reference(&Samwat::new(2073, 13, 1));
        assert!(matches!(
            result,
            Err(ConversionError::InvalidMonth { year: 2073, month: 13 })
        ));
    }
}
