//! Field extraction and normalization.
//!
//! Turns one `CountryRecord` into a flat `DisplayRecord`. Every optional field
//! is described by a `FieldSpec` in [`FIELDS`]; a single function walks that
//! table, so adding a field means adding a row.

pub mod format;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::country::CountryRecord;
use crate::errors::{CountryError, Result};

/// Shown for any optional text field the record does not carry.
pub const NOT_AVAILABLE: &str = "Not available";

/// Gini year read when no other policy is configured.
pub const DEFAULT_GINI_YEAR: &str = "2018";

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// Which `name.nativeName` entry to display.
///
/// The provider keys native names by language code with no stated order;
/// `First` takes whatever it sends first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NativeNamePolicy {
    #[default]
    First,
    /// Use this language code when present, otherwise fall back to `First`.
    Prefer(String),
}

/// Which `gini` year to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiniYearPolicy {
    Year(String),
    /// The greatest year key the record carries.
    Latest,
}

impl Default for GiniYearPolicy {
    fn default() -> Self {
        Self::Year(DEFAULT_GINI_YEAR.into())
    }
}

impl GiniYearPolicy {
    /// Parse `latest` or a four-digit year.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }
        if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Self::Year(value.to_string()));
        }
        Err(CountryError::Config(format!(
            "gini year must be 'latest' or a four-digit year, got '{value}'"
        )))
    }
}

/// Overridable choices the presenter makes on ambiguous provider data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresentPolicy {
    pub native_name: NativeNamePolicy,
    pub gini_year: GiniYearPolicy,
}

// ---------------------------------------------------------------------------
// Display model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayValue {
    Text { text: String },
    Image { src: String, alt: String },
    Link { href: String, text: String },
}

impl DisplayValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayField {
    pub key: String,
    pub label: String,
    pub value: DisplayValue,
}

const GOOGLE_MAPS_EMBED_URL: &str = "https://www.google.com/maps/embed/v1/view";

/// Map center and zoom for the embedded map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl MapView {
    pub fn new(lat: f64, lng: f64, area: f64) -> Self {
        Self {
            lat,
            lng,
            zoom: zoom_level(area),
        }
    }

    /// URL of an embeddable map centered on this view.
    ///
    /// Uses the Google Maps Embed API when a key is configured and falls
    /// back to an OpenStreetMap link otherwise. Query values are
    /// form-encoded, so the key cannot break out of its parameter.
    pub fn embed_url(&self, maps_api_key: Option<&str>) -> String {
        let Some(key) = maps_api_key else {
            return self.openstreetmap_url();
        };
        let center = format!("{},{}", self.lat, self.lng);
        let zoom = self.zoom.to_string();
        reqwest::Url::parse_with_params(
            GOOGLE_MAPS_EMBED_URL,
            [("key", key), ("center", center.as_str()), ("zoom", zoom.as_str())],
        )
        .map(String::from)
        .unwrap_or_else(|_| self.openstreetmap_url())
    }

    fn openstreetmap_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map={zoom}/{lat}/{lng}",
            lat = self.lat,
            lng = self.lng,
            zoom = self.zoom
        )
    }
}

/// A country flattened for display. Fields keep the table order of [`FIELDS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub title: String,
    pub map: MapView,
    pub fields: Vec<DisplayField>,
}

impl DisplayRecord {
    pub fn field(&self, key: &str) -> Option<&DisplayField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Text of a field, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(|f| f.value.as_text())
    }
}

/// Map zoom for a country of the given area in km².
///
/// Small countries get a close view, large ones a wide one.
pub fn zoom_level(area: f64) -> u8 {
    if area < 10_000.0 {
        9
    } else if area < 500_000.0 {
        5
    } else {
        3
    }
}

// ---------------------------------------------------------------------------
// Field schema
// ---------------------------------------------------------------------------

/// How a field's raw value becomes display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Scalar as text; arrays are joined.
    Text,
    /// Array items joined with ", ".
    Join,
    /// Object values joined with ", ".
    Values,
    /// Boolean as Yes/No.
    YesNo,
    /// Number followed by " km²".
    Area,
    NativeName,
    Currencies,
    Gini,
    Demonyms,
    Idd,
    Car,
    /// Image URL; alt text is built from `alt_prefix` and the title.
    Image { alt_prefix: &'static str },
    /// Link URL with fixed anchor text.
    Link { text: &'static str },
}

/// What to show when the formatter yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    NotAvailable,
    Omit,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub path: &'static [&'static str],
    pub format: Format,
    pub fallback: Fallback,
}

const fn text(
    key: &'static str,
    label: &'static str,
    path: &'static [&'static str],
    format: Format,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        path,
        format,
        fallback: Fallback::NotAvailable,
    }
}

const fn omit(
    key: &'static str,
    label: &'static str,
    path: &'static [&'static str],
    format: Format,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        path,
        format,
        fallback: Fallback::Omit,
    }
}

/// Every displayed field, in display order.
pub const FIELDS: &[FieldSpec] = &[
    text("official_name", "Official Name", &["name", "official"], Format::Text),
    text("native_name", "Native Name", &["name", "nativeName"], Format::NativeName),
    omit("flag", "Flag", &["flags", "png"], Format::Image { alt_prefix: "Flag of" }),
    text("capital", "Capital", &["capital"], Format::Join),
    text("population", "Population", &["population"], Format::Text),
    text("region", "Region", &["region"], Format::Text),
    text("subregion", "Subregion", &["subregion"], Format::Text),
    text("area", "Area", &["area"], Format::Area),
    text("languages", "Languages", &["languages"], Format::Values),
    text("demonyms", "Demonyms", &["demonyms", "eng"], Format::Demonyms),
    text("currencies", "Currency", &["currencies"], Format::Currencies),
    text("independent", "Independent", &["independent"], Format::YesNo),
    text("un_member", "UN Member", &["unMember"], Format::YesNo),
    text("status", "Status", &["status"], Format::Text),
    text("idd", "IDD Root and Suffixes", &["idd"], Format::Idd),
    text("borders", "Borders", &["borders"], Format::Join),
    text("car", "Car Signs and Side", &["car"], Format::Car),
    text("timezones", "Timezones", &["timezones"], Format::Join),
    text("continents", "Continents", &["continents"], Format::Join),
    omit(
        "coat_of_arms",
        "Coat of Arms",
        &["coatOfArms", "png"],
        Format::Image { alt_prefix: "Coat of arms of" },
    ),
    omit(
        "google_maps",
        "Google Maps",
        &["maps", "googleMaps"],
        Format::Link { text: "View on Google Maps" },
    ),
    omit(
        "open_street_map",
        "OpenStreetMap",
        &["maps", "openStreetMaps"],
        Format::Link { text: "View on OpenStreetMap" },
    ),
    text("tld", "Top-Level Domain (TLD)", &["tld"], Format::Join),
    text("gini", "Gini Index", &["gini"], Format::Gini),
    text("fifa", "FIFA Code", &["fifa"], Format::Text),
    text("start_of_week", "Start of Week", &["startOfWeek"], Format::Text),
    text("postal_code", "Postal Code Format", &["postalCode", "format"], Format::Text),
];

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Flatten a record into a `DisplayRecord`.
///
/// Fails only when a required field (`name.common`, `latlng`, `area`) is
/// missing; optional fields fall back per their `FieldSpec`.
pub fn present(record: &CountryRecord, policy: &PresentPolicy) -> Result<DisplayRecord> {
    let required = record.required()?;
    let fields = FIELDS
        .iter()
        .filter_map(|spec| normalize_field(record, spec, &required.common_name, policy))
        .collect();

    Ok(DisplayRecord {
        map: MapView::new(required.lat, required.lng, required.area),
        title: required.common_name,
        fields,
    })
}

/// Apply one `FieldSpec` to a record. `None` means the field is omitted.
pub fn normalize_field(
    record: &CountryRecord,
    spec: &FieldSpec,
    title: &str,
    policy: &PresentPolicy,
) -> Option<DisplayField> {
    let value = record
        .get_path(spec.path)
        .and_then(|raw| format_value(raw, spec.format, title, policy));

    let value = match (value, spec.fallback) {
        (Some(value), _) => value,
        (None, Fallback::NotAvailable) => DisplayValue::text(NOT_AVAILABLE),
        (None, Fallback::Omit) => return None,
    };

    Some(DisplayField {
        key: spec.key.to_string(),
        label: spec.label.to_string(),
        value,
    })
}

fn format_value(
    raw: &Value,
    kind: Format,
    title: &str,
    policy: &PresentPolicy,
) -> Option<DisplayValue> {
    let text = match kind {
        Format::Text => format::scalar(raw),
        Format::Join => format::join(raw),
        Format::Values => format::object_values(raw),
        Format::YesNo => raw.as_bool().map(|b| format::yes_no(b).to_string()),
        Format::Area => raw.as_f64().map(|a| format!("{} km²", format::number(a))),
        Format::NativeName => format::native_name(raw, &policy.native_name),
        Format::Currencies => format::currencies(raw),
        Format::Gini => format::gini(raw, &policy.gini_year),
        Format::Demonyms => format::demonyms(raw),
        Format::Idd => format::idd(raw),
        Format::Car => format::car(raw),
        Format::Image { alt_prefix } => {
            return format::non_empty_str(raw).map(|src| DisplayValue::Image {
                src: src.to_string(),
                alt: format!("{alt_prefix} {title}"),
            });
        }
        Format::Link { text } => {
            return format::non_empty_str(raw).map(|href| DisplayValue::Link {
                href: href.to_string(),
                text: text.to_string(),
            });
        }
    };
    text.map(DisplayValue::text)
}
