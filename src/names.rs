//! Month name and numeral lookups over the tables in [`crate::consts`].

use once_cell::sync::Lazy;

use crate::consts::{
    DEVANAGARI_DIGITS, MAX_MONTH, MONTH_NAMES, MONTH_NAMES_ABBR, MONTH_NAMES_DEVANAGARI,
    MONTH_NAMES_SHAHMUKHI,
};
use crate::prelude::*;

/// Script a month name is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Script {
    #[display(fmt = "Latin")]
    Latin,
    #[display(fmt = "Devanagari")]
    Devanagari,
    #[display(fmt = "Shahmukhi")]
    Shahmukhi,
}

impl Script {
    const fn table(self) -> &'static [&'static str; 13] {
        match self {
            Self::Latin => &MONTH_NAMES,
            Self::Devanagari => &MONTH_NAMES_DEVANAGARI,
            Self::Shahmukhi => &MONTH_NAMES_SHAHMUKHI,
        }
    }
}

/// Digit system used for numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Numerals {
    #[display(fmt = "Western")]
    Western,
    #[display(fmt = "Devanagari")]
    Devanagari,
}

impl Numerals {
    /// Regex character class matching one digit of this system
    pub const fn digit_class(self) -> &'static str {
        match self {
            Self::Western => "[0-9]",
            Self::Devanagari => "[०-९]",
        }
    }

    /// Rewrites the Western digits of `western` in this digit system
    pub fn render(self, western: &str) -> String {
        match self {
            Self::Western => western.to_owned(),
            Self::Devanagari => to_devanagari(western),
        }
    }

    /// Parses a string of digits of this system. `None` if any character is not one.
    pub fn parse(self, digits: &str) -> Option<u32> {
        digits.chars().try_fold(0u32, |acc, c| {
            let digit = match self {
                Self::Western => c.to_digit(10)?,
                Self::Devanagari => devanagari_value(c)?,
            };
            acc.checked_mul(10)?.checked_add(digit)
        })
    }
}

/// Name of `month` in the given script, `None` outside 1-12
pub fn month_name(script: Script, month: u32) -> Option<&'static str> {
    if month == 0 || month > MAX_MONTH {
        return None;
    }
    Some(script.table()[month as usize])
}

/// All month names a name directive accepts, paired with their month number,
/// in table order: Latin full, Latin abbreviated, Devanagari, Shahmukhi.
static KNOWN_NAMES: Lazy<Vec<(&'static str, u32)>> = Lazy::new(|| {
    [
        &MONTH_NAMES,
        &MONTH_NAMES_ABBR,
        &MONTH_NAMES_DEVANAGARI,
        &MONTH_NAMES_SHAHMUKHI,
    ]
    .into_iter()
    .flat_map(|table| (1..=MAX_MONTH).map(move |month| (table[month as usize], month)))
    .collect()
});

/// Resolves a month name in any supported script. Latin names ignore case.
///
/// A name that appears in several tables resolves to its first entry, so the
/// shared abbreviation `Ash` means Ashadh (3).
pub fn month_from_name(name: &str) -> Option<u32> {
    KNOWN_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, month)| month)
}

/// Regex alternation matching every entry of [`month_from_name`], longest
/// names first so an abbreviation never shadows the full name.
pub fn month_name_fragment() -> &'static str {
    static FRAGMENT: Lazy<String> = Lazy::new(|| {
        let mut names: Vec<&str> = KNOWN_NAMES.iter().map(|&(name, _)| name).collect();
        names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        names.dedup();
        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        format!("(?i:{alternation})")
    });
    &FRAGMENT
}

fn devanagari_value(c: char) -> Option<u32> {
    DEVANAGARI_DIGITS
        .iter()
        .position(|&digit| digit == c)
        .and_then(|index| u32::try_from(index).ok())
}

/// Replaces every Western digit in `s` with its Devanagari counterpart
pub fn to_devanagari(s: &str) -> String {
    s.chars()
        .map(|c| {
            c.to_digit(10)
                .map_or(c, |digit| DEVANAGARI_DIGITS[digit as usize])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_scripts() {
        assert_eq!(month_name(Script::Latin, 1), Some("Baisakh"));
        assert_eq!(month_name(Script::Devanagari, 7), Some("कार्तिक"));
        assert_eq!(month_name(Script::Shahmukhi, 12), Some("چیت"));
    }

    #[test]
    fn test_month_name_out_of_range() {
        assert_eq!(month_name(Script::Latin, 0), None);
        assert_eq!(month_name(Script::Latin, 13), None);
    }

    #[test]
    fn test_month_from_name() {
        assert_eq!(month_from_name("Kartik"), Some(7));
        assert_eq!(month_from_name("kartik"), Some(7));
        assert_eq!(month_from_name("KAR"), Some(7));
        assert_eq!(month_from_name("कार्तिक"), Some(7));
        assert_eq!(month_from_name("پوہ"), Some(9));
        assert_eq!(month_from_name("Chaitra"), Some(12));
        assert_eq!(month_from_name("Kartika"), None);
        assert_eq!(month_from_name(""), None);
    }

    #[test]
    fn test_shared_abbreviation_resolves_to_first_month() {
        assert_eq!(month_from_name("Ash"), Some(3));
        assert_eq!(month_from_name("Ashwin"), Some(6));
    }

    #[test]
    fn test_every_name_round_trips() {
        for script in [Script::Latin, Script::Devanagari, Script::Shahmukhi] {
            for month in 1..=12 {
                let name = month_name(script, month).unwrap();
                assert_eq!(month_from_name(name), Some(month), "{script} month {month}");
            }
        }
    }

    #[test]
    fn test_name_fragment_prefers_full_names() {
        let re = regex::Regex::new(&format!("^({})", month_name_fragment())).unwrap();
        assert_eq!(&re.captures("Ashadh,").unwrap()[1], "Ashadh");
        assert_eq!(&re.captures("ash,").unwrap()[1], "ash");
        assert_eq!(&re.captures("मंसिर").unwrap()[1], "मंसिर");
    }

    #[test]
    fn test_devanagari_digits() {
        assert_eq!(to_devanagari("2076-01-04"), "२०७६-०१-०४");
        assert_eq!(Numerals::Devanagari.parse("२०७३"), Some(2073));
        assert_eq!(Numerals::Devanagari.parse("२x"), None);
        assert_eq!(Numerals::Western.parse("0028"), Some(28));
        assert_eq!(Numerals::Western.parse("२८"), None);
        assert_eq!(Numerals::Western.parse("99999999999"), None);
    }

    #[test]
    fn test_numerals_render() {
        assert_eq!(Numerals::Western.render("07"), "07");
        assert_eq!(Numerals::Devanagari.render("07"), "०७");
    }
}
