// ABOUTME: Test support utilities.
// ABOUTME: Provides in-memory platform doubles for integration tests.

use std::sync::Once;

// Each test binary only uses some of these helpers, so allow dead_code.
#[allow(dead_code)]
pub mod doubles;

static TRACING_INIT: Once = Once::new();

/// Hook-handler configuration wired to the doubles' fixed resource names.
#[allow(dead_code)]
pub fn hook_config() -> cutover::config::Config {
    cutover::config::Config {
        active_stack_param: "/deploy/active-stack".to_string(),
        slot_a: cutover::config::SlotResources {
            trigger_name: "trigger-a".to_string(),
            store_name: "store-a".to_string(),
        },
        slot_b: cutover::config::SlotResources {
            trigger_name: "trigger-b".to_string(),
            store_name: "store-b".to_string(),
        },
        lb_host: "lb.internal".to_string(),
        test_port: 8443,
        lifecycle_phase: cutover::hooks::LifecyclePhase::AfterAllowTraffic,
        disable_retiring_trigger: true,
    }
}

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("cutover=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}
