use airquality_core::types::region::{CLAIRTON_PA, CLAIRTON_RADIUS_METRES};
use airquality_core::{Artifact, GeoPoint};
use serde_json::Value;

use super::{project_rows, required_array, FieldMapping, Provider};
use crate::error::IngestError;

pub const OPENAQ_ENDPOINT: &str = "https://api.openaq.org/v2/measurements";
pub const OPENAQ_OUTPUT_FILE: &str = "openaq.csv";

pub const OPENAQ_FIELDS: [FieldMapping; 8] = [
    ("datetime", &["date", "utc"]),
    ("location", &["location"]),
    ("parameter", &["parameter"]),
    ("value", &["value"]),
    ("unit", &["unit"]),
    ("latitude", &["coordinates", "latitude"]),
    ("longitude", &["coordinates", "longitude"]),
    ("country", &["country"]),
];

/// Latest OpenAQ measurements within a radius; needs no credentials
pub struct OpenAqProvider {
    center: GeoPoint,
    radius_metres: u32,
    limit: u32,
    endpoint: String,
}

impl OpenAqProvider {
    pub fn new() -> Self {
        Self {
            center: CLAIRTON_PA,
            radius_metres: CLAIRTON_RADIUS_METRES,
            limit: 1000,
            endpoint: OPENAQ_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for OpenAqProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for OpenAqProvider {
    fn label(&self) -> &'static str {
        "OpenAQ"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn output_file(&self) -> &'static str {
        OPENAQ_OUTPUT_FILE
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("coordinates", self.center.to_coordinates_param()),
            ("radius", self.radius_metres.to_string()),
            ("limit", self.limit.to_string()),
            ("order_by", "datetime".to_string()),
            ("sort", "desc".to_string()),
        ]
    }

    fn extract(&self, body: Value) -> Result<Artifact, IngestError> {
        let results = required_array(&body, "results")?;
        Ok(Artifact::Csv(project_rows(results, &OPENAQ_FIELDS)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_params() {
        assert_eq!(
            OpenAqProvider::new().query_params(),
            vec![
                ("coordinates", "40.2923,-79.8817".to_string()),
                ("radius", "25000".to_string()),
                ("limit", "1000".to_string()),
                ("order_by", "datetime".to_string()),
                ("sort", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_flattens_nested_fields() {
        let body = json!({
            "meta": {"found": 1},
            "results": [{
                "location": "Liberty 2",
                "parameter": "pm25",
                "value": 18.3,
                "unit": "µg/m³",
                "date": {"utc": "2024-01-01T05:00:00+00:00", "local": "2024-01-01T00:00:00-05:00"},
                "coordinates": {"latitude": 40.3238, "longitude": -79.8681},
                "country": "US"
            }]
        });

        let Artifact::Csv(table) = OpenAqProvider::new().extract(body).unwrap() else {
            panic!("expected CSV artifact");
        };

        assert_eq!(
            table.header,
            vec!["datetime", "location", "parameter", "value", "unit", "latitude", "longitude", "country"]
        );
        assert_eq!(
            table.rows[0],
            vec![
                "2024-01-01T05:00:00+00:00", "Liberty 2", "pm25", "18.3", "µg/m³", "40.3238",
                "-79.8681", "US"
            ]
        );
    }

    #[test]
    fn test_extract_requires_results() {
        let err = OpenAqProvider::new().extract(json!({"meta": {}})).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }
}
