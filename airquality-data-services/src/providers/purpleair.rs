use airquality_core::types::artifact::render_cell;
use airquality_core::types::region::CLAIRTON_BOUNDS;
use airquality_core::{Artifact, BoundingBox, Credential, CredentialError, CsvTable};
use serde_json::Value;

use super::{required_array, Provider};
use crate::error::IngestError;

pub const PURPLEAIR_ENDPOINT: &str = "https://api.purpleair.com/v1/sensors";
pub const PURPLEAIR_API_KEY_VAR: &str = "PURPLEAIR_API_KEY";
pub const PURPLEAIR_API_KEY_HEADER: &str = "X-API-Key";
pub const PURPLEAIR_OUTPUT_FILE: &str = "purpleair.csv";

/// Sensor fields requested from the API; the response echoes them as the header
pub const PURPLEAIR_FIELDS: &str =
    "sensor_index,name,latitude,longitude,pm2.5_atm,pm2.5_cf_1,humidity,temperature,location_type";

/// PurpleAir community sensors inside a bounding box
pub struct PurpleAirProvider {
    api_key: Credential,
    bounds: BoundingBox,
    endpoint: String,
}

impl PurpleAirProvider {
    pub fn new(api_key: Credential) -> Self {
        Self {
            api_key,
            bounds: CLAIRTON_BOUNDS,
            endpoint: PURPLEAIR_ENDPOINT.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, CredentialError> {
        Credential::require(&[PURPLEAIR_API_KEY_VAR]).map(Self::from_credentials)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Credential::require_with(&[PURPLEAIR_API_KEY_VAR], lookup).map(Self::from_credentials)
    }

    fn from_credentials(mut creds: Vec<Credential>) -> Self {
        Self::new(creds.remove(0))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Provider for PurpleAirProvider {
    fn label(&self) -> &'static str {
        "PurpleAir"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn output_file(&self) -> &'static str {
        PURPLEAIR_OUTPUT_FILE
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fields", PURPLEAIR_FIELDS.to_string()),
            ("nwlng", self.bounds.north_west.longitude.to_string()),
            ("nwlat", self.bounds.north_west.latitude.to_string()),
            ("selng", self.bounds.south_east.longitude.to_string()),
            ("selat", self.bounds.south_east.latitude.to_string()),
        ]
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![(PURPLEAIR_API_KEY_HEADER, self.api_key.expose().to_string())]
    }

    /// Header comes from the response's `fields`, rows from `data` as-is
    fn extract(&self, body: Value) -> Result<Artifact, IngestError> {
        let fields = required_array(&body, "fields")?;
        let data = required_array(&body, "data")?;

        let mut table = CsvTable::new(fields.iter().map(|f| render_cell(Some(f))));

        for (i, row) in data.iter().enumerate() {
            let cells = row
                .as_array()
                .ok_or_else(|| IngestError::Decode(format!("data row {} is not an array", i)))?;
            table.push_row(cells.iter().map(|c| render_cell(Some(c))).collect());
        }

        Ok(Artifact::Csv(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> PurpleAirProvider {
        PurpleAirProvider::new(Credential::new(PURPLEAIR_API_KEY_VAR, "pa-key"))
    }

    #[test]
    fn test_query_params_and_header() {
        let p = provider();
        assert_eq!(
            p.query_params(),
            vec![
                ("fields", PURPLEAIR_FIELDS.to_string()),
                ("nwlng", "-79.95".to_string()),
                ("nwlat", "40.35".to_string()),
                ("selng", "-79.8".to_string()),
                ("selat", "40.25".to_string()),
            ]
        );
        assert_eq!(p.headers(), vec![("X-API-Key", "pa-key".to_string())]);
    }

    #[test]
    fn test_extract_uses_response_fields() {
        let body = json!({
            "api_version": "V1.0.11",
            "fields": ["sensor_index", "name", "pm2.5_atm", "humidity"],
            "data": [
                [131075, "Clairton Backyard", 9.4, 41],
                [131079, "Glassport", null, 38]
            ]
        });

        let Artifact::Csv(table) = provider().extract(body).unwrap() else {
            panic!("expected CSV artifact");
        };

        assert_eq!(table.header, vec!["sensor_index", "name", "pm2.5_atm", "humidity"]);
        assert_eq!(table.rows[0], vec!["131075", "Clairton Backyard", "9.4", "41"]);
        assert_eq!(table.rows[1], vec!["131079", "Glassport", "", "38"]);
    }

    #[test]
    fn test_extract_requires_fields_and_data() {
        assert!(matches!(
            provider().extract(json!({"data": []})),
            Err(IngestError::Decode(_))
        ));
        assert!(matches!(
            provider().extract(json!({"fields": []})),
            Err(IngestError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_key() {
        assert!(PurpleAirProvider::from_lookup(|_| None).is_err());
    }
}
