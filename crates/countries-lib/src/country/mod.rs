//! Country record model.
//!
//! A provider record is open-ended: dozens of nested fields, any of which may
//! be missing. `CountryRecord` keeps the raw JSON object as received and
//! offers typed access to the few fields the provider always sends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CountryError, Result};

/// One country object as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryRecord {
    raw: Value,
}

/// The ordered list of records returned for one query.
pub type ResultSet = Vec<CountryRecord>;

/// Longest query accepted before it is embedded in a request path.
pub const MAX_QUERY_CHARS: usize = 200;

/// Reject queries longer than [`MAX_QUERY_CHARS`] characters.
pub fn check_query_length(query: &str) -> Result<()> {
    let len = query.chars().count();
    if len > MAX_QUERY_CHARS {
        return Err(CountryError::QueryTooLong {
            len,
            max: MAX_QUERY_CHARS,
        });
    }
    Ok(())
}

/// Fields every rendered record must carry.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredFields {
    pub common_name: String,
    pub lat: f64,
    pub lng: f64,
    pub area: f64,
}

impl CountryRecord {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Walk a path of object keys, e.g. `["maps", "googleMaps"]`.
    ///
    /// Returns `None` as soon as a segment is missing or the value is `null`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let mut current = &self.raw;
        for key in path {
            current = current.get(key)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// `name.common`, if present and a string.
    pub fn common_name(&self) -> Option<&str> {
        self.get_path(&["name", "common"]).and_then(Value::as_str)
    }

    /// Extract the required fields, failing on the first one that is
    /// missing or has the wrong shape.
    pub fn required(&self) -> Result<RequiredFields> {
        let common_name = self
            .common_name()
            .ok_or(CountryError::MalformedRecord { field: "name.common" })?
            .to_string();

        let latlng = self
            .get_path(&["latlng"])
            .and_then(Value::as_array)
            .ok_or(CountryError::MalformedRecord { field: "latlng" })?;
        let (lat, lng) = match latlng.as_slice() {
            [lat, lng, ..] => (
                lat.as_f64().ok_or(CountryError::MalformedRecord { field: "latlng" })?,
                lng.as_f64().ok_or(CountryError::MalformedRecord { field: "latlng" })?,
            ),
            _ => return Err(CountryError::MalformedRecord { field: "latlng" }),
        };

        let area = self
            .get_path(&["area"])
            .and_then(Value::as_f64)
            .ok_or(CountryError::MalformedRecord { field: "area" })?;

        Ok(RequiredFields {
            common_name,
            lat,
            lng,
            area,
        })
    }
}

impl From<Value> for CountryRecord {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

/// Parse a provider response body into a result set.
pub fn parse_result_set(body: &[u8]) -> Result<ResultSet> {
    serde_json::from_slice(body).map_err(CountryError::Json)
}
