use crate::consts::MAX_MONTH;
use crate::convert::{Bound, Calendar, ConversionError};

/// First B.S. year covered by [`BS_YEAR_TO_MONTHS`] (inclusive)
pub const FIRST_YEAR: i32 = 2000;
/// Last B.S. year covered by [`BS_YEAR_TO_MONTHS`] (inclusive)
pub const LAST_YEAR: i32 = 2090;

/// Days in each month of every supported B.S. year, starting at [`FIRST_YEAR`].
/// Index 0 of each row is unused (months are 1-indexed).
pub static BS_YEAR_TO_MONTHS: [[u8; 13]; (LAST_YEAR - FIRST_YEAR + 1) as usize] = [
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2000
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2001
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2002
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2003
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2004
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2005
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2006
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2007
    [0, 31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2008
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2009
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2010
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2011
    [0, 31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2012
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2013
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2014
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2015
    [0, 31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2016
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2017
    [0, 31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2018
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2019
    [0, 31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2020
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2021
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2022
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2023
    [0, 31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2024
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2025
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2026
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2027
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2028
    [0, 31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 2029
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2030
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2031
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2032
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2033
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2034
    [0, 30, 32, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2035
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2036
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2037
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2038
    [0, 31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2039
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2040
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2041
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2042
    [0, 31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2043
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2044
    [0, 31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2045
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2046
    [0, 31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2047
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2048
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2049
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2050
    [0, 31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2051
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2052
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2053
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2054
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2055
    [0, 31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 2056
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2057
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2058
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2059
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2060
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2061
    [0, 30, 32, 31, 32, 31, 31, 29, 30, 29, 30, 29, 31], // 2062
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2063
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2064
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2065
    [0, 31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2066
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2067
    [0, 31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2068
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2069
    [0, 31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2070
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2071
    [0, 31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2072
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2073
    [0, 31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2074
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2075
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2076
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2077
    [0, 31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2078
    [0, 31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2079
    [0, 31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2080
    [0, 31, 31, 32, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2081
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2082
    [0, 31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2083
    [0, 31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2084
    [0, 31, 32, 31, 32, 30, 31, 30, 30, 29, 30, 30, 30], // 2085
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2086
    [0, 31, 31, 32, 31, 31, 31, 30, 30, 29, 30, 30, 30], // 2087
    [0, 30, 31, 32, 32, 30, 31, 30, 30, 29, 30, 30, 30], // 2088
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2089
    [0, 30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2090
];

/// Returns the month lengths of a B.S. year
///
/// # Errors
/// Returns `ConversionError::YearOutOfRange` if the year is not covered by the table.
pub fn month_lengths(year: i32) -> Result<&'static [u8; 13], ConversionError> {
    if year < FIRST_YEAR {
        return Err(out_of_range(year, Bound::Lower));
    }
    if year > LAST_YEAR {
        return Err(out_of_range(year, Bound::Upper));
    }
    #[allow(clippy::cast_sign_loss)]
    let index = (year - FIRST_YEAR) as usize;
    Ok(&BS_YEAR_TO_MONTHS[index])
}

const fn out_of_range(year: i32, bound: Bound) -> ConversionError {
    ConversionError::YearOutOfRange {
        calendar: Calendar::BikramSamwat,
        bound,
        year,
        min: FIRST_YEAR,
        max: LAST_YEAR,
    }
}

/// Returns the number of days in the given month of a B.S. year
///
/// # Errors
/// Returns `ConversionError::YearOutOfRange` for years outside the table and
/// `ConversionError::InvalidMonth` for months outside 1-12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, ConversionError> {
    let lengths = month_lengths(year)?;
    if month == 0 || month > MAX_MONTH {
        return Err(ConversionError::InvalidMonth { year, month });
    }
    Ok(u32::from(lengths[month as usize]))
}

/// Total days in a B.S. year
///
/// # Errors
/// Returns `ConversionError::YearOutOfRange` for years outside the table.
pub fn days_in_year(year: i32) -> Result<u32, ConversionError> {
    Ok(month_lengths(year)?[1..].iter().copied().map(u32::from).sum())
}

/// Days in the months of `year` that come before `month`
///
/// # Errors
/// Same as [`days_in_month`].
pub fn days_before_month(year: i32, month: u32) -> Result<u32, ConversionError> {
    let lengths = month_lengths(year)?;
    if month == 0 || month > MAX_MONTH {
        return Err(ConversionError::InvalidMonth { year, month });
    }
    Ok(lengths[1..month as usize].iter().copied().map(u32::from).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_year() {
        for year in FIRST_YEAR..=LAST_YEAR {
            let lengths = month_lengths(year).unwrap();
            assert_eq!(lengths[0], 0, "Year {year} should leave index 0 unused");
            for month in 1..=12 {
                let days = lengths[month];
                assert!(
                    (29..=32).contains(&days),
                    "Year {year} month {month} has {days} days"
                );
            }
        }
    }

    #[test]
    fn test_year_lengths_are_plausible() {
        for year in FIRST_YEAR..=LAST_YEAR {
            let days = days_in_year(year).unwrap();
            assert!((365..=366).contains(&days), "Year {year} has {days} days");
        }
    }

    #[test]
    fn test_days_in_month_known_values() {
        assert_eq!(days_in_month(2000, 1).unwrap(), 30);
        assert_eq!(days_in_month(2000, 2).unwrap(), 32);
        assert_eq!(days_in_month(2073, 12).unwrap(), 31);
        assert_eq!(days_in_month(2079, 12).unwrap(), 30);
        assert_eq!(days_in_month(2090, 12).unwrap(), 30);
    }

    #[test]
    fn test_days_before_month() {
        assert_eq!(days_before_month(2000, 1).unwrap(), 0);
        assert_eq!(days_before_month(2000, 2).unwrap(), 30);
        assert_eq!(
            days_before_month(2000, 12).unwrap() + days_in_month(2000, 12).unwrap(),
            days_in_year(2000).unwrap()
        );
    }

    #[test]
    fn test_year_below_table() {
        let result = days_in_month(1999, 1);
        assert!(matches!(
            result,
            Err(ConversionError::YearOutOfRange {
                calendar: Calendar::BikramSamwat,
                bound: Bound::Lower,
                year: 1999,
                ..
            })
        ));
    }

    #[test]
    fn test_year_above_table() {
        let result = days_in_year(2091);
        assert!(matches!(
            result,
            Err(ConversionError::YearOutOfRange {
                calendar: Calendar::BikramSamwat,
                bound: Bound::Upper,
                year: 2091,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            days_in_month(2073, 0),
            Err(ConversionError::InvalidMonth { year: 2073, month: 0 })
        ));
        assert!(matches!(
            days_in_month(2073, 13),
            Err(ConversionError::InvalidMonth { year: 2073, month: 13 })
        ));
        assert!(days_before_month(2073, 13).is_err());
    }
}
