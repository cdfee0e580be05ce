use chrono::NaiveDate;

/// Maximum valid month (Chaitra)
pub const MAX_MONTH: u32 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u32 = 1;

/// Month number for Baisakh, the first month of the B.S. year
pub const BAISAKH: u32 = 1;
/// Month number for Chaitra, the last month of the B.S. year
pub const CHAITRA: u32 = 12;

/// First A.D. year accepted by the converter (inclusive)
pub const AD_FIRST_YEAR: i32 = 1944;
/// Last A.D. year accepted by the converter (inclusive)
pub const AD_LAST_YEAR: i32 = 2033;

/// A.D. side of the epoch anchor: 1944-01-01
pub const EPOCH_AD: NaiveDate = match NaiveDate::from_ymd_opt(AD_FIRST_YEAR, 1, 1) {
    Some(date) => date,
    None => panic!("epoch anchor must be a valid date"),
};
/// B.S. side of the epoch anchor, the same day as [`EPOCH_AD`]: 2000-09-17
pub const EPOCH_BS: (i32, u32, u32) = (2000, 9, 17);

/// Century prepended to two-digit years (`73` reads as `2073`)
pub const CENTURY: i32 = 20;

/// ISO 8601 style pattern used by `Samwat::from_iso`
pub const ISO_PATTERN: &str = "%Y-%m-%d";

/// Month names in Latin script (index 0 unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 13] = [
    "", "Baisakh", "Jestha", "Ashadh", "Shrawan", "Bhadra", "Ashwin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// Three letter abbreviations of [`MONTH_NAMES`]. `Ash` is shared by Ashadh and Ashwin.
pub const MONTH_NAMES_ABBR: [&str; 13] = [
    "", "Bai", "Jes", "Ash", "Shr", "Bha", "Ash", "Kar", "Man", "Pou", "Mag", "Fal", "Cha",
];

/// Month names in Devanagari script
pub const MONTH_NAMES_DEVANAGARI: [&str; 13] = [
    "", "वैशाख", "जेष्ठ", "आषाढ़", "श्रावण", "भाद्र", "आश्विन", "कार्तिक", "मंसिर", "पौष", "माघ",
    "फाल्गुन", "चैत्र",
];

/// Month names in Shahmukhi script
pub const MONTH_NAMES_SHAHMUKHI: [&str; 13] = [
    "", "بیساکھ", "جیٹھ", "ہاڑ", "ساون", "بھادوں", "اسو", "کتا", "مگھر", "پوہ", "ماگھ", "پھگن",
    "چیت",
];

/// Devanagari digits, indexed by their Western value
pub const DEVANAGARI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];
