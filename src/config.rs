// ABOUTME: Environment-driven configuration for the lifecycle-hook handlers.
// ABOUTME: Resolves per-slot resource names, the health endpoint, and the active-stack parameter.

use crate::error::{Error, Result};
use crate::hooks::LifecyclePhase;
use crate::stackref::StackReference;
use std::env;

/// The resources belonging to one slot. Teardown only ever touches the
/// retiring slot's pair; the newly active pair is read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotResources {
    /// Scheduled trigger that produces the slot's background work.
    pub trigger_name: String,
    /// The slot's data store.
    pub store_name: String,
}

/// Hook-handler configuration, resolved from the hosting environment once
/// per process and reused across invocations.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the parameter holding the active stack reference.
    pub active_stack_param: String,
    pub slot_a: SlotResources,
    pub slot_b: SlotResources,
    /// Load-balancer host serving the test-traffic listener.
    pub lb_host: String,
    /// Port of the test-traffic listener probed by the health gate.
    pub test_port: u16,
    /// The phase this handler deployment is wired to.
    pub lifecycle_phase: LifecyclePhase,
    /// Whether teardown disables the retiring slot's scheduled trigger.
    /// Hook-handler deployments disagree on this, so it is configurable.
    pub disable_retiring_trigger: bool,
}

impl Config {
    /// Load configuration from the environment, failing fast on anything
    /// missing or malformed.
    pub fn from_env() -> Result<Self> {
        let test_port_raw = require("TEST_PORT")?;
        let test_port = test_port_raw
            .parse::<u16>()
            .map_err(|_| Error::InvalidConfig(format!("invalid TEST_PORT: '{test_port_raw}'")))?;

        let disable_retiring_trigger = match env::var("DISABLE_RETIRING_TRIGGER") {
            Ok(value) => parse_bool(&value).ok_or_else(|| {
                Error::InvalidConfig(format!("invalid DISABLE_RETIRING_TRIGGER: '{value}'"))
            })?,
            Err(_) => true,
        };

        Ok(Self {
            active_stack_param: require("ACTIVE_STACK_PARAM_NAME")?,
            slot_a: SlotResources {
                trigger_name: require("TRIGGER_RULE_NAME_A")?,
                store_name: require("DATA_STORE_NAME_A")?,
            },
            slot_b: SlotResources {
                trigger_name: require("TRIGGER_RULE_NAME_B")?,
                store_name: require("DATA_STORE_NAME_B")?,
            },
            lb_host: require("LB_DNS_NAME")?,
            test_port,
            lifecycle_phase: LifecyclePhase::parse(&require("LIFECYCLE_EVENT")?),
            disable_retiring_trigger,
        })
    }

    /// The resource pair belonging to `slot`.
    pub fn slot_resources(&self, slot: StackReference) -> &SlotResources {
        match slot {
            StackReference::A => &self.slot_a,
            StackReference::B => &self.slot_b,
        }
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::MissingEnvVar(name.to_string()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
