// ABOUTME: Durable pointer to the active resource slot, backed by the parameter service.
// ABOUTME: Exactly one of slot A or B is active at any time; reads are never cached.

use crate::platform::{ParameterError, ParameterStore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two parallel resource slots.
///
/// The persisted form is a one-character tag. Any persisted value other than
/// `"a"` reads as slot B; there is no third state, and a read never yields
/// "no active slot" or "both active".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackReference {
    A,
    B,
}

impl StackReference {
    /// The logical inverse: the slot that is not this one.
    pub fn invert(self) -> Self {
        match self {
            StackReference::A => StackReference::B,
            StackReference::B => StackReference::A,
        }
    }

    /// The one-character tag persisted in the parameter service.
    pub fn as_tag(self) -> &'static str {
        match self {
            StackReference::A => "a",
            StackReference::B => "b",
        }
    }

    /// Parse the persisted tag. `"a"` is slot A; anything else is slot B.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "a" {
            StackReference::A
        } else {
            StackReference::B
        }
    }
}

impl fmt::Display for StackReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Errors reading or writing the stack reference. Fatal to the caller:
/// retry policy belongs to the component that asked, not to the store.
#[derive(Debug, thiserror::Error)]
pub enum StackRefError {
    #[error("failed to read active stack reference: {0}")]
    Read(#[source] ParameterError),

    #[error("failed to write active stack reference: {0}")]
    Write(#[source] ParameterError),
}

/// The persisted active/inactive slot pointer.
///
/// Writes are read-then-write with no compare-and-swap guard; serializing
/// deployments per application is the invoking engine's obligation.
pub struct StackReferenceStore<P> {
    parameters: P,
    param_name: String,
}

impl<P: ParameterStore> StackReferenceStore<P> {
    pub fn new(parameters: P, param_name: impl Into<String>) -> Self {
        Self {
            parameters,
            param_name: param_name.into(),
        }
    }

    /// Authoritative read of the active slot. Always hits the source of truth.
    pub async fn get_active(&self) -> Result<StackReference, StackRefError> {
        let value = self
            .parameters
            .get_parameter(&self.param_name)
            .await
            .map_err(StackRefError::Read)?;
        Ok(StackReference::from_tag(&value))
    }

    /// The slot the next deployment should target: the inverse of the active one.
    pub async fn get_next(&self) -> Result<StackReference, StackRefError> {
        Ok(self.get_active().await?.invert())
    }

    /// Unconditionally overwrite the active slot pointer.
    pub async fn set_active(&self, reference: StackReference) -> Result<(), StackRefError> {
        tracing::info!(active = %reference, "setting active stack reference");
        self.parameters
            .put_parameter(&self.param_name, reference.as_tag())
            .await
            .map_err(StackRefError::Write)
    }
}
