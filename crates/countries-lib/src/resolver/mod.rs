//! Best-match selection over a provider result set.

use crate::country::CountryRecord;
use crate::errors::Result;
use crate::presenter::{self, DisplayRecord, PresentPolicy};

/// Outcome of resolving one result set.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Match(DisplayRecord),
    /// The result set was empty; any displayed record should be cleared.
    NoMatch,
}

/// Whether `name` equals `query` ignoring case. No trimming.
pub fn names_match(name: &str, query: &str) -> bool {
    name.to_lowercase() == query.to_lowercase()
}

/// Pick the record to display.
///
/// The first record whose `name.common` equals `query` case-insensitively
/// wins; otherwise the first record in provider order. `None` only for an
/// empty set.
pub fn select_record<'a>(results: &'a [CountryRecord], query: &str) -> Option<&'a CountryRecord> {
    results
        .iter()
        .find(|record| record.common_name().is_some_and(|name| names_match(name, query)))
        .or_else(|| results.first())
}

/// Select the best match and flatten it for display.
pub fn resolve(results: &[CountryRecord], query: &str, policy: &PresentPolicy) -> Result<Resolution> {
    let Some(record) = select_record(results, query) else {
        tracing::debug!(query, "Empty result set");
        return Ok(Resolution::NoMatch);
    };
    let display = presenter::present(record, policy)?;
    let selected = &display.title;
    tracing::debug!(query, selected = %selected, candidates = results.len(), "Resolved country");
    Ok(Resolution::Match(display))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CountryError;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(common: &str) -> CountryRecord {
        CountryRecord::new(json!({
            "name": { "common": common, "official": format!("Republic of {common}") },
            "latlng": [10.0, 20.0],
            "area": 123456.0
        }))
    }

    #[test]
    fn exact_match_wins_over_provider_order() {
        let results = vec![record("Niger"), record("Nigeria")];
        let selected = select_record(&results, "nigeria").unwrap();
        assert_eq!(selected.common_name(), Some("Nigeria"));
    }

    #[test]
    fn falls_back_to_first_record() {
        let results = vec![record("Guinea-Bissau"), record("Equatorial Guinea")];
        let selected = select_record(&results, "guin").unwrap();
        assert_eq!(selected, &results[0]);
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let results = vec![record("Chad"), record("France")];
        let selected = select_record(&results, " france").unwrap();
        assert_eq!(selected.common_name(), Some("Chad"));
    }

    #[test]
    fn first_of_several_matches_wins() {
        let mut second = record("India").into_raw();
        second["area"] = json!(1.0);
        let results = vec![record("Indonesia"), record("INDIA"), CountryRecord::new(second)];
        let selected = select_record(&results, "India").unwrap();
        assert_eq!(selected, &results[1]);
    }

    #[test]
    fn unicode_case_folding() {
        let results = vec![record("Åland Islands"), record("Österreich")];
        let selected = select_record(&results, "ÖSTERREICH").unwrap();
        assert_eq!(selected.common_name(), Some("Österreich"));
    }

    #[test]
    fn records_without_common_name_are_skipped_for_matching() {
        let results = vec![CountryRecord::new(json!({ "cca2": "XX" })), record("Peru")];
        let selected = select_record(&results, "peru").unwrap();
        assert_eq!(selected.common_name(), Some("Peru"));
    }

    #[test]
    fn empty_set_is_no_match() {
        let resolution = resolve(&[], "France", &PresentPolicy::default()).unwrap();
        assert_eq!(resolution, Resolution::NoMatch);
    }

    #[test]
    fn resolve_presents_selected_record() {
        let results = vec![record("Sudan"), record("South Sudan")];
        match resolve(&results, "south sudan", &PresentPolicy::default()).unwrap() {
            Resolution::Match(display) => {
                assert_eq!(display.title, "South Sudan");
                assert_eq!(display.map.zoom, 5);
            }
            Resolution::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn malformed_selection_fails_fast() {
        let results = vec![CountryRecord::new(json!({ "name": { "common": "Ghost" } }))];
        let err = resolve(&results, "ghost", &PresentPolicy::default()).unwrap_err();
        assert!(matches!(err, CountryError::MalformedRecord { .. }));
    }

    proptest! {
        #[test]
        fn selection_is_exact_match_or_first(
            names in proptest::collection::vec("[A-Za-z ]{1,12}", 1..8),
            query in "[A-Za-z ]{1,12}",
        ) {
            let results: Vec<CountryRecord> = names.iter().map(|n| record(n)).collect();
            let selected = select_record(&results, &query).unwrap();
            match names.iter().position(|n| names_match(n, &query)) {
                Some(idx) => prop_assert_eq!(selected, &results[idx]),
                None => prop_assert_eq!(selected, &results[0]),
            }
        }

        #[test]
        fn zoom_is_monotone_in_area(a in 0.0f64..2.0e7, b in 0.0f64..2.0e7) {
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(presenter::zoom_level(small) >= presenter::zoom_level(large));
        }
    }
}
