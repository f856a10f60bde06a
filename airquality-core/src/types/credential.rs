use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{}", missing_message(.names))]
    Missing { names: Vec<&'static str> },
}

fn missing_message(names: &[&'static str]) -> String {
    let noun = if names.len() > 1 { "variables" } else { "variable" };
    format!("Set {} environment {}.", names.join(" and "), noun)
}

/// A named secret read from the process environment.
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    name: &'static str,
    value: String,
}

impl Credential {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// The secret itself, for placing into a request
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Read all `names` from the environment
    ///
    /// Every name must be set to a non-empty value; otherwise all missing
    /// names are reported together.
    pub fn require(names: &[&'static str]) -> Result<Vec<Credential>, CredentialError> {
        Self::require_with(names, |name| std::env::var(name).ok())
    }

    /// Same as [`Credential::require`] with a custom lookup (used by tests)
    pub fn require_with<F>(
        names: &[&'static str],
        lookup: F,
    ) -> Result<Vec<Credential>, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut found = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for &name in names {
            match lookup(name).filter(|v| !v.is_empty()) {
                Some(value) => found.push(Credential::new(name, value)),
                None => missing.push(name),
            }
        }

        if !missing.is_empty() {
            tracing::error!("Missing credentials: {:?}", missing);
            return Err(CredentialError::Missing { names: missing });
        }

        Ok(found)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}
