//! Directive-based date patterns.
//!
//! A pattern such as `"%Y-%m-%d"` or `"%Yne %B %-dne"` mixes literal text with
//! directives: a `%`, an optional `-` for the unpadded variant, and one to
//! three word characters. Each directive is a row of [`DIRECTIVES`]; matching
//! fragments, value extraction and formatting are all derived from that row.
//!
//! | directive | field | form |
//! |-----------|-------|------|
//! | `%d`, `%-d`, `%dne`, `%-dne` | day | number, padded or not, Western or Devanagari digits |
//! | `%m`, `%-m`, `%mne`, `%-mne` | month | number, padded or not, Western or Devanagari digits |
//! | `%Y`, `%Yne` | year | four digits |
//! | `%y`, `%yne` | year | two digits, read with the century `20` |
//! | `%B`, `%Bne`, `%S` | month | name, formatted in Latin, Devanagari or Shahmukhi |

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::Samwat;
use crate::consts::CENTURY;
use crate::names::{self, Numerals, Script};
use crate::prelude::*;

/// Number of distinct fields a parse pattern must supply.
const REQUIRED_FIELDS: usize = 3;

/// Calendar field a directive reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Field {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

impl Field {
    /// Digits of the zero-padded representation
    const fn width(self) -> usize {
        match self {
            Self::Year => 4,
            Self::Month | Self::Day => 2,
        }
    }
}

/// Textual representation of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// Decimal number, zero-padded to the field width or not padded at all
    Number { padded: bool },
    /// Last two digits of the year, read back with [`CENTURY`] prepended
    ShortYear,
    /// Month name; parsing accepts every known script, formatting uses this one
    Name(Script),
}

/// One entry of the directive table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub token: &'static str,
    pub field: Field,
    pub form: Form,
    pub numerals: Numerals,
}

const fn directive(token: &'static str, field: Field, form: Form, numerals: Numerals) -> Directive {
    Directive {
        token,
        field,
        form,
        numerals,
    }
}

const PADDED: Form = Form::Number { padded: true };
const UNPADDED: Form = Form::Number { padded: false };

/// Every directive understood by [`compile`] and [`format`].
pub static DIRECTIVES: &[Directive] = &[
    directive("%d", Field::Day, PADDED, Numerals::Western),
    directive("%-d", Field::Day, UNPADDED, Numerals::Western),
    directive("%dne", Field::Day, PADDED, Numerals::Devanagari),
    directive("%-dne", Field::Day, UNPADDED, Numerals::Devanagari),
    directive("%m", Field::Month, PADDED, Numerals::Western),
    directive("%-m", Field::Month, UNPADDED, Numerals::Western),
    directive("%mne", Field::Month, PADDED, Numerals::Devanagari),
    directive("%-mne", Field::Month, UNPADDED, Numerals::Devanagari),
    directive("%Y", Field::Year, PADDED, Numerals::Western),
    directive("%Yne", Field::Year, PADDED, Numerals::Devanagari),
    directive("%y", Field::Year, Form::ShortYear, Numerals::Western),
    directive("%yne", Field::Year, Form::ShortYear, Numerals::Devanagari),
    directive("%B", Field::Month, Form::Name(Script::Latin), Numerals::Western),
    directive("%Bne", Field::Month, Form::Name(Script::Devanagari), Numerals::Western),
    directive("%S", Field::Month, Form::Name(Script::Shahmukhi), Numerals::Western),
];

impl Directive {
    /// Looks up a directive by its exact token
    pub fn lookup(token: &str) -> Option<&'static Self> {
        DIRECTIVES.iter().find(|d| d.token == token)
    }

    /// Regex fragment matching one occurrence, without a capture group
    fn fragment(&self) -> String {
        let digit = self.numerals.digit_class();
        match self.form {
            Form::Number { padded: true } => format!("{digit}{{{}}}", self.field.width()),
            Form::Number { padded: false } => format!("{digit}{{1,{}}}", self.field.width()),
            Form::ShortYear => format!("{digit}{{2}}"),
            Form::Name(_) => names::month_name_fragment().to_owned(),
        }
    }

    /// Turns captured text back into the field's integer value
    fn extract(&self, text: &str) -> Result<i64, PatternError> {
        if text.is_empty() {
            return Err(PatternError::EmptyCapture { directive: self.token });
        }
        let number = |text: &str| {
            self.numerals
                .parse(text)
                .ok_or_else(|| PatternError::InvalidNumber { text: text.to_owned() })
        };
        match self.form {
            Form::Name(_) => names::month_from_name(text)
                .map(i64::from)
                .ok_or_else(|| PatternError::UnknownName { name: text.to_owned() }),
            Form::Number { .. } => number(text).map(i64::from),
            Form::ShortYear => Ok(i64::from(CENTURY) * 100 + i64::from(number(text)?)),
        }
    }

    /// Renders this directive for `date`
    fn render(&self, date: &Samwat) -> Result<String, PatternError> {
        let value = match self.field {
            Field::Year => i64::from(date.year()),
            Field::Month => i64::from(date.month()),
            Field::Day => i64::from(date.day()),
        };
        let western = match self.form {
            Form::Number { padded: true } => format!("{value:0width$}", width = self.field.width()),
            Form::Number { padded: false } => value.to_string(),
            Form::ShortYear => format!("{:02}", value.rem_euclid(100)),
            Form::Name(script) => {
                return names::month_name(script, date.month())
                    .map(str::to_owned)
                    .ok_or(PatternError::MonthOutOfRange { month: date.month() });
            }
        };
        Ok(self.numerals.render(&western))
    }
}

/// Error type for pattern compilation, matching and formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// Token that is not in the directive table.
    #[error("Invalid date directive {token:?} in pattern {pattern:?}")]
    UnknownDirective { token: String, pattern: String },

    /// Parse pattern without exactly one year, month and day directive.
    #[error(
        "Invalid number of date fields in pattern {pattern:?}: expected 3 (year, month, day), found {found}"
    )]
    FieldCount { pattern: String, found: usize },

    /// Field supplied by more than one directive.
    #[error("Date field {field} appears more than once in pattern {pattern:?}")]
    DuplicateField { pattern: String, field: Field },

    /// Input does not match the pattern.
    #[error("Could not match pattern {pattern:?} with {input:?}")]
    NoMatch { pattern: String, input: String },

    /// Captured month name not in the name tables.
    #[error("Unknown month name {name:?}")]
    UnknownName { name: String },

    /// Numeral directive captured nothing.
    #[error("Empty value captured for directive {directive}")]
    EmptyCapture { directive: &'static str },

    /// Captured digits do not form a usable number.
    #[error("Invalid number {text:?}")]
    InvalidNumber { text: String },

    /// Month name requested for a month outside 1-12.
    #[error("Invalid month {month} for a month name (must be 1-12)")]
    MonthOutOfRange { month: u32 },

    /// Generated regex was rejected.
    #[error("Invalid generated regex: {0}")]
    Regex(String),
}

#[allow(clippy::expect_used)]
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%-?\w{1,3}").expect("directive token regex is valid"));

/// A directive occurrence inside a pattern string.
struct Token {
    span: Range<usize>,
    directive: &'static Directive,
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    TOKEN_RE
        .find_iter(pattern)
        .map(|found| {
            Directive::lookup(found.as_str())
                .map(|directive| Token {
                    span: found.range(),
                    directive,
                })
                .ok_or_else(|| PatternError::UnknownDirective {
                    token: found.as_str().to_owned(),
                    pattern: pattern.to_owned(),
                })
        })
        .collect()
}

/// A parse pattern turned into an anchored regex, one capture group per directive.
#[derive(Clone)]
pub struct CompiledPattern {
    pattern: String,
    regex: Regex,
    directives: Vec<&'static Directive>,
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("pattern", &self.pattern)
            .field("regex", &self.regex.as_str())
            .finish_non_exhaustive()
    }
}

/// Compiles a parse pattern.
///
/// # Errors
/// Returns `PatternError::UnknownDirective` for tokens not in [`DIRECTIVES`],
/// `FieldCount` unless year, month and day are all present, and
/// `DuplicateField` if one of them is given twice.
pub fn compile(pattern: &str) -> Result<CompiledPattern, PatternError> {
    let tokens = tokenize(pattern)?;

    let mut fields: Vec<Field> = tokens.iter().map(|t| t.directive.field).collect();
    fields.sort_unstable();
    fields.dedup();
    if fields.len() != REQUIRED_FIELDS {
        return Err(PatternError::FieldCount {
            pattern: pattern.to_owned(),
            found: fields.len(),
        });
    }
    if tokens.len() != REQUIRED_FIELDS {
        let field = tokens
            .iter()
            .enumerate()
            .find(|&(i, t)| {
                tokens[..i]
                    .iter()
                    .any(|prev| prev.directive.field == t.directive.field)
            })
            .map_or(Field::Day, |(_, t)| t.directive.field);
        return Err(PatternError::DuplicateField {
            pattern: pattern.to_owned(),
            field,
        });
    }

    let mut source = String::from("^");
    let mut cursor = 0;
    for token in &tokens {
        source.push_str(&regex::escape(&pattern[cursor..token.span.start]));
        source.push('(');
        source.push_str(&token.directive.fragment());
        source.push(')');
        cursor = token.span.end;
    }
    source.push_str(&regex::escape(&pattern[cursor..]));

    Ok(CompiledPattern {
        pattern: pattern.to_owned(),
        regex: Regex::new(&source).map_err(|e| PatternError::Regex(e.to_string()))?,
        directives: tokens.iter().map(|t| t.directive).collect(),
    })
}

impl CompiledPattern {
    /// The pattern string this was compiled from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The generated regex source
    pub fn regex(&self) -> &str {
        self.regex.as_str()
    }

    /// Matches `input` from its start and returns `(year, month, day)`.
    ///
    /// # Errors
    /// Returns `PatternError::NoMatch` if the input does not match, and
    /// `UnknownName`, `EmptyCapture` or `InvalidNumber` if a capture cannot be
    /// turned into a value.
    pub fn match_fields(&self, input: &str) -> Result<(i32, u32, u32), PatternError> {
        let captures = self
            .regex
            .captures(input)
            .ok_or_else(|| PatternError::NoMatch {
                pattern: self.pattern.clone(),
                input: input.to_owned(),
            })?;

        let (mut year, mut month, mut day) = (0, 0, 0);
        for (index, directive) in self.directives.iter().enumerate() {
            let text = captures.get(index + 1).map_or("", |m| m.as_str());
            let value = directive.extract(text)?;
            let invalid = || PatternError::InvalidNumber { text: text.to_owned() };
            match directive.field {
                Field::Year => year = i32::try_from(value).map_err(|_| invalid())?,
                Field::Month => month = u32::try_from(value).map_err(|_| invalid())?,
                Field::Day => day = u32::try_from(value).map_err(|_| invalid())?,
            }
        }
        Ok((year, month, day))
    }
}

/// Formats `date` by replacing each directive of `pattern` in place.
///
/// Literal text is copied as is. Repeated directives are each rendered.
///
/// # Errors
/// Returns `PatternError::UnknownDirective` for tokens not in [`DIRECTIVES`]
/// and `MonthOutOfRange` when a name directive meets a month outside 1-12.
pub fn format(date: &Samwat, pattern: &str) -> Result<String, PatternError> {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut cursor = 0;
    for token in tokenize(pattern)? {
        out.push_str(&pattern[cursor..token.span.start]);
        out.push_str(&token.directive.render(date)?);
        cursor = token.span.end;
    }
    out.push_str(&pattern[cursor..]);
    Ok(out)
}

/// Memoizes compiled patterns by their exact pattern string.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: DashMap<String, Arc<CompiledPattern>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached compilation of `pattern`, compiling it on first use.
    ///
    /// When two threads compile the same pattern at once, both get the entry
    /// that was inserted first.
    ///
    /// # Errors
    /// Propagates [`compile`] errors; failures are not cached.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>, PatternError> {
        if let Some(hit) = self.compiled.get(pattern) {
            trace!("pattern cache hit for {pattern:?}");
            return Ok(Arc::clone(hit.value()));
        }

        let compiled = Arc::new(compile(pattern)?);
        let entry = self
            .compiled
            .entry(pattern.to_owned())
            .or_insert_with(|| {
                debug!("compiled date pattern {pattern:?} as {}", compiled.regex());
                compiled
            });
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn clear(&self) {
        self.compiled.clear();
    }
}

/// The cache used by `Samwat::parse`.
pub fn global_cache() -> &'static PatternCache {
    static CACHE: Lazy<PatternCache> = Lazy::new(PatternCache::new);
    &CACHE
}
