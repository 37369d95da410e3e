//! Terminal and JSON rendering of a `DisplayRecord`.

use serde::Serialize;

use crate::errors::Result;
use crate::presenter::{DisplayRecord, DisplayValue, MapView};

/// A `DisplayRecord` plus its resolved map URL, as emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct RenderedCountry<'a> {
    #[serde(flatten)]
    pub record: &'a DisplayRecord,
    pub map_url: String,
}

/// Header line for a displayed country.
pub fn heading(record: &DisplayRecord) -> String {
    format!("Country Information: {}", record.title)
}

/// Text shown for one field value.
pub fn value_text(value: &DisplayValue) -> String {
    match value {
        DisplayValue::Text { text } => text.clone(),
        DisplayValue::Image { src, .. } => src.clone(),
        DisplayValue::Link { href, text } => format!("{text} <{href}>"),
    }
}

/// `(label, text)` rows in display order, starting with the map.
pub fn rows(record: &DisplayRecord, maps_api_key: Option<&str>) -> Vec<(String, String)> {
    let mut rows = Vec::with_capacity(record.fields.len() + 1);
    rows.push(("Map".to_string(), map_line(&record.map, maps_api_key)));
    rows.extend(
        record
            .fields
            .iter()
            .map(|f| (f.label.clone(), value_text(&f.value))),
    );
    rows
}

fn map_line(map: &MapView, maps_api_key: Option<&str>) -> String {
    format!("{} (zoom {})", map.embed_url(maps_api_key), map.zoom)
}

/// Pretty JSON rendering.
pub fn to_json(record: &DisplayRecord, maps_api_key: Option<&str>) -> Result<String> {
    let rendered = RenderedCountry {
        record,
        map_url: record.map.embed_url(maps_api_key),
    };
    Ok(serde_json::to_string_pretty(&rendered)?)
}
