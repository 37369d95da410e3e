//! Value formatters used by the field schema.
//!
//! Each returns `None` when the value is missing, empty, or the wrong shape,
//! leaving the fallback decision to the caller.

use serde_json::Value;

use super::{GiniYearPolicy, NativeNamePolicy};

/// Render a number the way a browser would: integral values lose the `.0`.
pub fn number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

/// A non-empty string value.
pub fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Scalar as text. Arrays are joined so a field that turns into a list
/// upstream still renders.
pub fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_f64().map(number),
        Value::Bool(b) => Some(yes_no(*b).to_string()),
        Value::Array(_) => join(value),
        _ => None,
    }
}

fn join_items<'a>(items: impl Iterator<Item = &'a Value>) -> Option<String> {
    let parts: Vec<String> = items.filter_map(scalar).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Array items joined with ", ". Empty arrays yield `None`.
pub fn join(value: &Value) -> Option<String> {
    value.as_array().and_then(|items| join_items(items.iter()))
}

/// Object values joined with ", ", in provider order.
pub fn object_values(value: &Value) -> Option<String> {
    value.as_object().and_then(|map| join_items(map.values()))
}

/// `"{official} ({common})"` for the entry picked by `policy`.
pub fn native_name(value: &Value, policy: &NativeNamePolicy) -> Option<String> {
    let names = value.as_object()?;
    let entry = match policy {
        NativeNamePolicy::Prefer(lang) => names.get(lang).or_else(|| names.values().next()),
        NativeNamePolicy::First => names.values().next(),
    }?;

    let official = entry.get("official").and_then(non_empty_str);
    let common = entry.get("common").and_then(non_empty_str);
    match (official, common) {
        (Some(official), Some(common)) => Some(format!("{official} ({common})")),
        (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
        (None, None) => None,
    }
}

/// Every currency as `"{name} ({symbol})"`, joined with ", ". A currency
/// missing either part shows the other alone.
pub fn currencies(value: &Value) -> Option<String> {
    let parts: Vec<String> = value
        .as_object()?
        .values()
        .filter_map(|currency| {
            let name = currency.get("name").and_then(non_empty_str);
            let symbol = currency.get("symbol").and_then(non_empty_str);
            match (name, symbol) {
                (Some(name), Some(symbol)) => Some(format!("{name} ({symbol})")),
                (Some(text), None) | (None, Some(text)) => Some(text.to_string()),
                (None, None) => None,
            }
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Gini coefficient for the year picked by `policy`.
pub fn gini(value: &Value, policy: &GiniYearPolicy) -> Option<String> {
    let by_year = value.as_object()?;
    let entry = match policy {
        GiniYearPolicy::Year(year) => by_year.get(year),
        GiniYearPolicy::Latest => by_year
            .iter()
            .filter_map(|(year, v)| year.parse::<u32>().ok().map(|y| (y, v)))
            .max_by_key(|(y, _)| *y)
            .map(|(_, v)| v),
    }?;
    entry.as_f64().map(number)
}

/// `demonyms.eng` as `"English - {f} (Female), {m} (Male)"`.
pub fn demonyms(value: &Value) -> Option<String> {
    let female = value.get("f").and_then(non_empty_str);
    let male = value.get("m").and_then(non_empty_str);
    let parts: Vec<String> = [(female, "Female"), (male, "Male")]
        .into_iter()
        .filter_map(|(name, label)| name.map(|n| format!("{n} ({label})")))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("English - {}", parts.join(", ")))
    }
}

/// International dialing prefix as `"{root} {suffixes}"`.
pub fn idd(value: &Value) -> Option<String> {
    let root = value.get("root").and_then(non_empty_str);
    let suffixes = value.get("suffixes").and_then(join);
    match (root, suffixes) {
        (Some(root), Some(suffixes)) => Some(format!("{root} {suffixes}")),
        (Some(root), None) => Some(root.to_string()),
        (None, Some(suffixes)) => Some(suffixes),
        (None, None) => None,
    }
}

/// Car signs and driving side as `"{signs}, Side: {side}"`.
pub fn car(value: &Value) -> Option<String> {
    let signs = value.get("signs").and_then(join);
    let side = value.get("side").and_then(non_empty_str);
    match (signs, side) {
        (Some(signs), Some(side)) => Some(format!("{signs}, Side: {side}")),
        (None, Some(side)) => Some(format!("Side: {side}")),
        (Some(signs), None) => Some(signs),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_drops_integral_fraction() {
        assert_eq!(number(551695.0), "551695");
        assert_eq!(number(0.44), "0.44");
        assert_eq!(number(-97.0), "-97");
    }

    #[test]
    fn scalar_handles_each_shape() {
        assert_eq!(scalar(&json!("Europe")).as_deref(), Some("Europe"));
        assert_eq!(scalar(&json!(67391582)).as_deref(), Some("67391582"));
        assert_eq!(scalar(&json!(true)).as_deref(), Some("Yes"));
        assert_eq!(scalar(&json!("")), None);
        assert_eq!(scalar(&json!({ "a": 1 })), None);
    }

    #[test]
    fn join_skips_blank_items() {
        assert_eq!(join(&json!(["F", ""])).as_deref(), Some("F"));
        assert_eq!(join(&json!([""])), None);
        assert_eq!(join(&json!("not a list")), None);
    }

    #[test]
    fn object_values_in_order() {
        let langs = json!({ "deu": "German", "fra": "French", "ita": "Italian" });
        assert_eq!(object_values(&langs).as_deref(), Some("German, French, Italian"));
        assert_eq!(object_values(&json!({})), None);
    }

    #[test]
    fn native_name_first_entry() {
        let names = json!({
            "ara": { "official": "دولة الإمارات العربية المتحدة", "common": "الإمارات" }
        });
        assert_eq!(
            native_name(&names, &NativeNamePolicy::First).as_deref(),
            Some("دولة الإمارات العربية المتحدة (الإمارات)")
        );
        assert_eq!(native_name(&json!({}), &NativeNamePolicy::First), None);
    }

    #[test]
    fn native_name_prefer_falls_back_to_first() {
        let names = json!({ "spa": { "official": "Reino de España", "common": "España" } });
        assert_eq!(
            native_name(&names, &NativeNamePolicy::Prefer("eng".into())).as_deref(),
            Some("Reino de España (España)")
        );
    }

    #[test]
    fn currency_without_symbol_shows_name() {
        let value = json!({ "XYZ": { "name": "Token" } });
        assert_eq!(currencies(&value).as_deref(), Some("Token"));
        assert_eq!(currencies(&json!({})), None);
    }

    #[test]
    fn currency_without_name_shows_symbol() {
        let value = json!({ "XTS": { "symbol": "¤" }, "EUR": { "name": "Euro", "symbol": "€" } });
        assert_eq!(currencies(&value).as_deref(), Some("¤, Euro (€)"));
        assert_eq!(currencies(&json!({ "XTS": { "symbol": "¤" } })).as_deref(), Some("¤"));
    }

    #[test]
    fn gini_latest_ignores_non_year_keys() {
        let value = json!({ "2010": 40.0, "note": 1.0, "2016": 35.5 });
        assert_eq!(gini(&value, &GiniYearPolicy::Latest).as_deref(), Some("35.5"));
    }

    #[test]
    fn demonyms_partial() {
        assert_eq!(
            demonyms(&json!({ "m": "Swiss" })).as_deref(),
            Some("English - Swiss (Male)")
        );
        assert_eq!(demonyms(&json!({})), None);
    }

    #[test]
    fn idd_variants() {
        assert_eq!(idd(&json!({ "root": "+3", "suffixes": ["3"] })).as_deref(), Some("+3 3"));
        assert_eq!(idd(&json!({ "root": "+7" })).as_deref(), Some("+7"));
        assert_eq!(idd(&json!({})), None);
    }

    #[test]
    fn car_variants() {
        assert_eq!(
            car(&json!({ "signs": ["F"], "side": "right" })).as_deref(),
            Some("F, Side: right")
        );
        assert_eq!(car(&json!({ "signs": [""], "side": "left" })).as_deref(), Some("Side: left"));
        assert_eq!(car(&json!({})), None);
    }
}
