//! Flat input records as they appear in data files
//!
//! A data file is a JSON array of objects. One object may declare a
//! universe, a series and a work at the same time through shared keys.
//! Every field is optional; the identity fields decide which loader pass
//! picks the record up. A field holding a value of the wrong type is
//! dropped with a warning, as if it were absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Either a single value or a list of values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Numeral-like value: `7`, `7.5` or `"7"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeral {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeral {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeral::Int(n) => Some(*n as f64),
            Numeral::Float(n) => Some(*n),
            Numeral::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Integral value; `"4"`, `4` and `4.0` all yield `4`
    pub fn as_i64(&self) -> Option<i64> {
        if let Numeral::Int(n) = self {
            return Some(*n);
        }
        self.as_f64()
            .filter(|n| n.fract() == 0.0)
            .map(|n| n as i64)
    }
}

/// One object from a data file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    #[serde(deserialize_with = "lenient")]
    pub universe_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub universe_description: Option<String>,
    #[serde(alias = "universeAlternativeTitles", deserialize_with = "lenient")]
    pub universe_alternative_title: Option<OneOrMany<String>>,

    #[serde(deserialize_with = "lenient")]
    pub series_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub series_description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub related_series: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub number_in_universe: Option<Numeral>,
    #[serde(alias = "seriesAlternativeTitles", deserialize_with = "lenient")]
    pub series_alternative_title: Option<OneOrMany<String>>,

    #[serde(deserialize_with = "lenient")]
    pub work_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub number_in_series: Option<OneOrMany<Numeral>>,
    #[serde(deserialize_with = "lenient")]
    pub can_be_read_independently: Option<bool>,
}

/// Deserialize an optional field, mapping a type mismatch to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(%value, "Ignoring mistyped field: {}", e);
            Ok(None)
        }
    }
}

impl Record {
    pub fn universe_alternative_titles(&self) -> Vec<String> {
        self.universe_alternative_title
            .clone()
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
    }

    pub fn series_alternative_titles(&self) -> Vec<String> {
        self.series_alternative_title
            .clone()
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
    }

    /// `numberInUniverse` as an integer; unparseable values are dropped
    pub fn number_in_universe(&self) -> Option<i64> {
        let raw = self.number_in_universe.as_ref()?;
        let parsed = raw.as_i64();
        if parsed.is_none() {
            warn!(
                series = self.series_title.as_deref().unwrap_or_default(),
                value = ?raw,
                "Ignoring unparseable numberInUniverse"
            );
        }
        parsed
    }

    /// `numberInSeries` parsed as floats
    ///
    /// A missing field yields an empty list. Entries that are not numerals
    /// are skipped with a warning.
    pub fn positions(&self) -> Vec<f64> {
        let Some(raw) = self.number_in_series.clone() else {
            return Vec::new();
        };

        raw.into_vec()
            .into_iter()
            .filter_map(|numeral| {
                let value = numeral.as_f64();
                if value.is_none() {
                    warn!(
                        work_id = self.work_id.as_deref().unwrap_or_default(),
                        value = ?numeral,
                        "Ignoring unparseable numberInSeries entry"
                    );
                }
                value
            })
            .collect()
    }

    pub fn can_be_read_independently(&self) -> bool {
        self.can_be_read_independently.unwrap_or(false)
    }
}
