// ABOUTME: Lifecycle-hook state machine: phase model, health gate, and post-swap teardown.
// ABOUTME: Dispatch is total over the engine's five phases and always reports a terminal status.

mod dispatcher;
mod error;
mod event;
mod health;
mod teardown;

pub use dispatcher::HookDispatcher;
pub use error::HookError;
pub use event::{LifecycleEvent, LifecyclePhase};
pub use health::{HEALTH_MIN_REMAINING, HEALTH_POLL_DELAY, HealthGate};
pub use teardown::{STORE_WAIT_CEILING, STORE_WAIT_POLL_DELAY, Teardown};
