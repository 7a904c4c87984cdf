// src/catalog/columns.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::PLACEHOLDERS;

/// Every column the catalog has carried since the 2018 revision, in the
/// order the JSON and TSV outputs use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    NameAscii,
    NameDiacritics,
    Designation,
    Id,
    IdDiacritics,
    Constellation,
    Component,
    WdsJ,
    Magnitude,
    Band,
    Hip,
    Hd,
    Ra,
    Dec,
    Date,
    Notes,
}

static NAME_ASCII: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z']+( [A-Z][a-z]+)?$").expect("valid regex"));
static NAME_DIACRITICS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Lu}[\p{L}'’]+( \p{Lu}\p{L}+)?$").expect("valid regex"));
static DESIGNATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:HR |HD |GJ |WASP-|HAT-P-|XO-|HIP |TrES-|BD[+-][0-9]{1,2} )[0-9]{1,6}|PSR .+)$",
    )
    .expect("valid regex")
});
static ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z]{1,3}[0-9]{0,4}|[0-9]{1,4})$").expect("valid regex"));
static ID_DIACRITICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:V[0-9]+|[α-ωµb-zAY]{1,3}[0-9]{0,4}|[0-9]{1,4})$").expect("valid regex")
});
static CONSTELLATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z]{2}$").expect("valid regex"));
static COMPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]?[0-9]?$").expect("valid regex"));
static WDS_J: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}[-+][0-9]{4}$").expect("valid regex"));
static BAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]$").expect("valid regex"));
static CATALOG_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,6}$").expect("valid regex"));
static SEXAGESIMAL_RA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2} [0-9]{2} [0-9]{2}(?:\.[0-9]+)?$").expect("valid regex")
});
static SEXAGESIMAL_DEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]{1,2} [0-9]{2} [0-9]{2}(?:\.[0-9]+)?$").expect("valid regex")
});
static NOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*@]$").expect("valid regex"));

/// A lone `-`, `*` or `_`.
pub fn is_placeholder(value: &str) -> bool {
    let mut chars = value.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PLACEHOLDERS.contains(&c))
}

fn float_in(value: &str, accept: impl Fn(f64) -> bool) -> bool {
    value.parse::<f64>().map_or(false, accept)
}

impl Column {
    pub const ALL: [Column; 16] = [
        Column::NameAscii,
        Column::NameDiacritics,
        Column::Designation,
        Column::Id,
        Column::IdDiacritics,
        Column::Constellation,
        Column::Component,
        Column::WdsJ,
        Column::Magnitude,
        Column::Band,
        Column::Hip,
        Column::Hd,
        Column::Ra,
        Column::Dec,
        Column::Date,
        Column::Notes,
    ];

    /// Canonical name, used as the JSON key and TSV header.
    pub fn header(self) -> &'static str {
        match self {
            Column::NameAscii => "Name/ASCII",
            Column::NameDiacritics => "Name/Diacritics",
            Column::Designation => "Designation",
            Column::Id => "ID",
            Column::IdDiacritics => "ID/Diacritics",
            Column::Constellation => "Con",
            Column::Component => "#",
            Column::WdsJ => "WDS_J",
            Column::Magnitude => "mag",
            Column::Band => "bnd",
            Column::Hip => "HIP",
            Column::Hd => "HD",
            Column::Ra => "RA(J2000)",
            Column::Dec => "Dec(J2000)",
            Column::Date => "Date",
            Column::Notes => "notes",
        }
    }

    /// Header tokens this column has gone by across revisions. The file
    /// heads both ID columns with a bare `ID`.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::NameAscii => &["Name/ASCII", "Name"],
            Column::NameDiacritics => &["Name/Diacritics"],
            Column::Designation => &["Designation"],
            Column::Id => &["ID"],
            Column::IdDiacritics => &["ID/Diacritics", "ID"],
            Column::Constellation => &["Con"],
            Column::Component => &["#"],
            Column::WdsJ => &["WDS_J"],
            Column::Magnitude => &["mag", "Vmag"],
            Column::Band => &["bnd"],
            Column::Hip => &["HIP"],
            Column::Hd => &["HD"],
            Column::Ra => &["RA(J2000)", "RA"],
            Column::Dec => &["Dec(J2000)", "Dec"],
            Column::Date => &["Date"],
            Column::Notes => &["notes", "Notes"],
        }
    }

    /// Columns every revision has had. Missing one means the format moved.
    pub fn required_in_header(self) -> bool {
        matches!(
            self,
            Column::NameAscii
                | Column::Designation
                | Column::Constellation
                | Column::Magnitude
                | Column::Hip
                | Column::Hd
                | Column::Ra
                | Column::Dec
                | Column::Date
        )
    }

    /// Only the ASCII name must carry a value.
    pub fn value_required(self) -> bool {
        self == Column::NameAscii
    }

    /// Most whitespace tokens a value may span when a row is re-split.
    pub fn max_tokens(self) -> usize {
        match self {
            Column::NameAscii | Column::NameDiacritics | Column::Designation => 2,
            Column::Ra | Column::Dec => 3,
            _ => 1,
        }
    }

    /// Whether `value` (already trimmed) is plausible for this column.
    /// Empty values and placeholders pass unless the column needs a value.
    pub fn accepts(self, value: &str) -> bool {
        if value.is_empty() || is_placeholder(value) {
            return !self.value_required();
        }
        match self {
            Column::NameAscii => NAME_ASCII.is_match(value),
            Column::NameDiacritics => NAME_DIACRITICS.is_match(value),
            Column::Designation => DESIGNATION.is_match(value),
            Column::Id => ID.is_match(value),
            Column::IdDiacritics => ID_DIACRITICS.is_match(value),
            Column::Constellation => CONSTELLATION.is_match(value),
            Column::Component => COMPONENT.is_match(value),
            Column::WdsJ => WDS_J.is_match(value),
            Column::Magnitude => float_in(value, |m| m > -2.0 && m < 13.0),
            Column::Band => BAND.is_match(value),
            Column::Hip | Column::Hd => CATALOG_NUMBER.is_match(value),
            Column::Ra => {
                float_in(value, |ra| (0.0..=360.0).contains(&ra)) || SEXAGESIMAL_RA.is_match(value)
            }
            Column::Dec => {
                float_in(value, |dec| (-90.0..=90.0).contains(&dec))
                    || SEXAGESIMAL_DEC.is_match(value)
            }
            Column::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            Column::Notes => NOTES.is_match(value),
        }
    }
}
