// ABOUTME: Build number parsing and comparison for the deployment guard.
// ABOUTME: Build numbers arrive as strings on engine events and order deployments.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildNumberError {
    #[error("build number cannot be empty")]
    Empty,

    #[error("invalid build number: '{0}'")]
    NotANumber(String),
}

/// A monotonically increasing build number attached to each deployment request.
///
/// The engine sends these as strings; deployments only proceed when the
/// incoming build is strictly greater than the previously deployed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BuildNumber(u64);

impl BuildNumber {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn parse(value: &str) -> Result<Self, BuildNumberError> {
        if value.is_empty() {
            return Err(BuildNumberError::Empty);
        }
        value
            .parse::<u64>()
            .map(Self)
            .map_err(|_| BuildNumberError::NotANumber(value.to_string()))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<String> for BuildNumber {
    type Error = BuildNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BuildNumber> for String {
    fn from(build: BuildNumber) -> Self {
        build.0.to_string()
    }
}

impl fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
