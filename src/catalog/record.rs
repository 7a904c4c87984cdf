// src/catalog/record.rs

use serde::{Serialize, Serializer};
use std::{collections::BTreeMap, fmt};

use super::columns::{is_placeholder, Column};
use super::row::RowValues;
use crate::error::{RowError, RowProblem};
use crate::normalize::PLACEHOLDER;

/// An optional catalog value. Placeholders and blanks both become `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field {
    Present(String),
    #[default]
    Absent,
}

impl Field {
    pub fn from_raw(raw: &str) -> Self {
        let value = raw.trim();
        if value.is_empty() || is_placeholder(value) {
            Field::Absent
        } else {
            Field::Present(value.to_string())
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent => None,
        }
    }
}

/// JSON: the value, or `null`.
impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(v) => serializer.serialize_str(v),
            Field::Absent => serializer.serialize_none(),
        }
    }
}

/// Text: the value, or the `-` placeholder.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Present(v) => f.write_str(v),
            Field::Absent => write!(f, "{}", PLACEHOLDER),
        }
    }
}

/// Catalogs a star can be cross-referenced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CrossId {
    Hr,
    Hd,
    Hip,
    Gj,
    WdsJ,
}

/// One named star. Field order and JSON keys follow [`Column::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarRecord {
    #[serde(rename = "Name/ASCII")]
    pub name_ascii: String,
    #[serde(rename = "Name/Diacritics")]
    pub name_diacritics: Field,
    #[serde(rename = "Designation")]
    pub designation: Field,
    #[serde(rename = "ID")]
    pub id: Field,
    #[serde(rename = "ID/Diacritics")]
    pub id_diacritics: Field,
    #[serde(rename = "Con")]
    pub constellation: Field,
    #[serde(rename = "#")]
    pub component: Field,
    #[serde(rename = "WDS_J")]
    pub wds_j: Field,
    #[serde(rename = "mag")]
    pub magnitude: Field,
    #[serde(rename = "bnd")]
    pub band: Field,
    #[serde(rename = "HIP")]
    pub hip: Field,
    #[serde(rename = "HD")]
    pub hd: Field,
    #[serde(rename = "RA(J2000)")]
    pub ra: Field,
    #[serde(rename = "Dec(J2000)")]
    pub dec: Field,
    #[serde(rename = "Date")]
    pub date: Field,
    #[serde(rename = "notes")]
    pub notes: Field,
}

impl StarRecord {
    /// Build a record from a parsed row. `line` and `raw` identify the row
    /// in the error when it has no name.
    pub fn from_values(values: &RowValues, line: usize, raw: &str) -> Result<Self, RowError> {
        let take = |column: Column| Field::from_raw(values.get(column).unwrap_or_default());

        let name_ascii = match take(Column::NameAscii) {
            Field::Present(name) => name,
            Field::Absent => {
                return Err(RowError {
                    line,
                    problem: RowProblem::MissingName,
                    content: raw.trim_end().to_string(),
                })
            }
        };

        Ok(StarRecord {
            name_ascii,
            name_diacritics: take(Column::NameDiacritics),
            designation: take(Column::Designation),
            id: take(Column::Id),
            id_diacritics: take(Column::IdDiacritics),
            constellation: take(Column::Constellation),
            component: take(Column::Component),
            wds_j: take(Column::WdsJ),
            magnitude: take(Column::Magnitude),
            band: take(Column::Band),
            hip: take(Column::Hip),
            hd: take(Column::Hd),
            ra: take(Column::Ra),
            dec: take(Column::Dec),
            date: take(Column::Date),
            notes: take(Column::Notes),
        })
    }

    /// The name as published, diacritics included when the catalog has them.
    pub fn name(&self) -> &str {
        self.name_diacritics.as_deref().unwrap_or(&self.name_ascii)
    }

    pub fn field(&self, column: Column) -> Option<&Field> {
        Some(match column {
            Column::NameAscii => return None,
            Column::NameDiacritics => &self.name_diacritics,
            Column::Designation => &self.designation,
            Column::Id => &self.id,
            Column::IdDiacritics => &self.id_diacritics,
            Column::Constellation => &self.constellation,
            Column::Component => &self.component,
            Column::WdsJ => &self.wds_j,
            Column::Magnitude => &self.magnitude,
            Column::Band => &self.band,
            Column::Hip => &self.hip,
            Column::Hd => &self.hd,
            Column::Ra => &self.ra,
            Column::Dec => &self.dec,
            Column::Date => &self.date,
            Column::Notes => &self.notes,
        })
    }

    /// Value of any column, `None` when absent.
    pub fn get(&self, column: Column) -> Option<&str> {
        match column {
            Column::NameAscii => Some(&self.name_ascii),
            other => self.field(other).and_then(Field::as_deref),
        }
    }

    pub fn magnitude_value(&self) -> Option<f64> {
        self.magnitude.as_deref()?.parse().ok()
    }

    /// Cross-references from the designation plus the HIP, HD and WDS_J
    /// columns. The HD column wins over an HD designation.
    pub fn identifiers(&self) -> BTreeMap<CrossId, String> {
        let mut ids = BTreeMap::new();
        if let Some((prefix, number)) = self.designation.as_deref().and_then(|d| d.split_once(' ')) {
            let id = match prefix {
                "HR" => Some(CrossId::Hr),
                "HD" => Some(CrossId::Hd),
                "HIP" => Some(CrossId::Hip),
                "GJ" => Some(CrossId::Gj),
                _ => None,
            };
            if let Some(id) = id {
                ids.insert(id, number.to_string());
            }
        }
        for (id, field) in [
            (CrossId::Hip, &self.hip),
            (CrossId::Hd, &self.hd),
            (CrossId::WdsJ, &self.wds_j),
        ] {
            if let Some(v) = field.as_deref() {
                ids.insert(id, v.to_string());
            }
        }
        ids
    }
}
