use airquality_core::{Artifact, Credential, CredentialError};
use serde_json::Value;

use super::{ErrorPolicy, Provider};
use crate::error::IngestError;

pub const AQS_ENDPOINT: &str = "https://aqs.epa.gov/data/api/dailyData/byCounty";
pub const AQS_EMAIL_VAR: &str = "AQS_EMAIL";
pub const AQS_KEY_VAR: &str = "AQS_KEY";
pub const AQS_OUTPUT_FILE: &str = "epa_aqs.json";

/// AQS parameter code for PM2.5 (local conditions)
pub const PM25_PARAMETER: &str = "88101";

/// EPA AQS daily PM2.5 data for Allegheny County, PA, calendar year 2023
pub struct AqsProvider {
    email: Credential,
    key: Credential,
    parameter: String,
    begin_date: String,
    end_date: String,
    state: String,
    county: String,
    endpoint: String,
}

impl AqsProvider {
    pub fn new(email: Credential, key: Credential) -> Self {
        Self {
            email,
            key,
            parameter: PM25_PARAMETER.to_string(),
            begin_date: "20230101".to_string(),
            end_date: "20231231".to_string(),
            state: "42".to_string(),
            county: "003".to_string(),
            endpoint: AQS_ENDPOINT.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, CredentialError> {
        Credential::require(&[AQS_EMAIL_VAR, AQS_KEY_VAR]).map(Self::from_credentials)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Credential::require_with(&[AQS_EMAIL_VAR, AQS_KEY_VAR], lookup).map(Self::from_credentials)
    }

    /// Credentials arrive in request order: email, then key
    fn from_credentials(mut creds: Vec<Credential>) -> Self {
        let key = creds.remove(1);
        let email = creds.remove(0);
        Self::new(email, key)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Provider for AqsProvider {
    fn label(&self) -> &'static str {
        "EPA AQS"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn output_file(&self) -> &'static str {
        AQS_OUTPUT_FILE
    }

    // AQS failures are reported and the run still exits normally
    fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::Report
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("email", self.email.expose().to_string()),
            ("key", self.key.expose().to_string()),
            ("param", self.parameter.clone()),
            ("bdate", self.begin_date.clone()),
            ("edate", self.end_date.clone()),
            ("state", self.state.clone()),
            ("county", self.county.clone()),
        ]
    }

    fn extract(&self, body: Value) -> Result<Artifact, IngestError> {
        Ok(Artifact::Json(body))
    }
}
