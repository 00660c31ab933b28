//! CarQuery API response DTOs.
//!
//! The API returns every scalar as a string (or `null`), including years and
//! numeric specs, so the fields here are strings too. Fields we don't model
//! explicitly are kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat JSON record, used for trims and model details whose field set
/// depends on the request (`full_results=0` returns a reduced set).
pub type Record = Map<String, Value>;

/// Response payload of `getYears`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct YearRange {
    /// Earliest model year in the database.
    pub min_year: String,
    /// Latest model year in the database.
    pub max_year: String,
}

/// One entry of `getMakes`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Make {
    /// Make identifier, used as the `make` filter elsewhere (e.g. `"ford"`).
    pub make_id: String,
    /// Display name (e.g. `"Ford"`).
    pub make_display: String,
    /// `"1"` for common makes.
    #[serde(default)]
    pub make_is_common: Option<String>,
    #[serde(default)]
    pub make_country: Option<String>,
    #[serde(flatten)]
    pub extra: Record,
}

/// One entry of `getModels`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelName {
    pub model_name: String,
    pub model_make_id: String,
    #[serde(flatten)]
    pub extra: Record,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn year_range_from_payload() {
        let years: YearRange =
            serde_json::from_value(json!({"min_year": "1940", "max_year": "2012"})).unwrap();
        assert_eq!(years.min_year, "1940");
        assert_eq!(years.max_year, "2012");
    }

    #[test]
    fn make_keeps_unknown_fields() {
        let make: Make = serde_json::from_value(json!({
            "make_id": "acura",
            "make_display": "Acura",
            "make_is_common": "1",
            "make_country": "USA",
            "make_founded": "1986"
        }))
        .unwrap();

        assert_eq!(make.make_id, "acura");
        assert_eq!(make.make_country.as_deref(), Some("USA"));
        assert_eq!(make.extra.get("make_founded"), Some(&json!("1986")));
    }

    #[test]
    fn make_with_only_required_fields() {
        let make: Make =
            serde_json::from_value(json!({"make_id": "ac", "make_display": "AC"})).unwrap();
        assert_eq!(make.make_is_common, None);
        assert!(make.extra.is_empty());
    }

    #[test]
    fn model_name_roundtrips_through_json() {
        let model = ModelName {
            model_name: "Bantam".into(),
            model_make_id: "ford".into(),
            extra: Record::new(),
        };
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value, json!({"model_name": "Bantam", "model_make_id": "ford"}));
    }
}
