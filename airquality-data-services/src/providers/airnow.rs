use airquality_core::types::region::{CLAIRTON_PA, CLAIRTON_RADIUS_MILES};
use airquality_core::{Artifact, Credential, CredentialError, GeoPoint};
use chrono::{Days, NaiveDate, Utc};
use serde_json::Value;

use super::{project_rows, FieldMapping, Provider};
use crate::error::IngestError;

pub const AIRNOW_ENDPOINT: &str = "https://www.airnowapi.org/aq/observation/latLong/historical/";
pub const AIRNOW_API_KEY_VAR: &str = "AIRNOW_API_KEY";
pub const AIRNOW_OUTPUT_FILE: &str = "epa_airnow.csv";

/// Output columns in order; `Category` is the nested category name
pub const AIRNOW_FIELDS: [FieldMapping; 10] = [
    ("DateObserved", &["DateObserved"]),
    ("HourObserved", &["HourObserved"]),
    ("LocalTimeZone", &["LocalTimeZone"]),
    ("ReportingArea", &["ReportingArea"]),
    ("StateCode", &["StateCode"]),
    ("Latitude", &["Latitude"]),
    ("Longitude", &["Longitude"]),
    ("ParameterName", &["ParameterName"]),
    ("AQI", &["AQI"]),
    ("Category", &["Category", "Name"]),
];

/// EPA AirNow historical observations around a point for one day
pub struct AirNowProvider {
    api_key: Credential,
    center: GeoPoint,
    radius_miles: u32,
    date: NaiveDate,
    endpoint: String,
}

impl AirNowProvider {
    /// Observations around Clairton, PA for yesterday (UTC)
    pub fn new(api_key: Credential) -> Self {
        Self {
            api_key,
            center: CLAIRTON_PA,
            radius_miles: CLAIRTON_RADIUS_MILES,
            date: yesterday_utc(),
            endpoint: AIRNOW_ENDPOINT.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, CredentialError> {
        Credential::require(&[AIRNOW_API_KEY_VAR]).map(Self::from_credentials)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Credential::require_with(&[AIRNOW_API_KEY_VAR], lookup).map(Self::from_credentials)
    }

    fn from_credentials(mut creds: Vec<Credential>) -> Self {
        Self::new(creds.remove(0))
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

fn yesterday_utc() -> NaiveDate {
    let today = Utc::now().date_naive();
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

impl Provider for AirNowProvider {
    fn label(&self) -> &'static str {
        "EPA AirNow"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn output_file(&self) -> &'static str {
        AIRNOW_OUTPUT_FILE
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", "application/json".to_string()),
            ("latitude", self.center.latitude.to_string()),
            ("longitude", self.center.longitude.to_string()),
            ("date", self.date.format("%Y-%m-%dT00-00-00").to_string()),
            ("distance", self.radius_miles.to_string()),
            ("API_KEY", self.api_key.expose().to_string()),
        ]
    }

    fn extract(&self, body: Value) -> Result<Artifact, IngestError> {
        let rows = body
            .as_array()
            .ok_or_else(|| IngestError::Decode("expected a JSON array of observations".to_string()))?;

        Ok(Artifact::Csv(project_rows(rows, &AIRNOW_FIELDS)))
    }
}
