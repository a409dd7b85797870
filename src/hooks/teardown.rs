// ABOUTME: AfterAllowTraffic teardown of the retiring slot, strictly ordered.
// ABOUTME: The reference flip is the last step and is skipped on any earlier failure.

use crate::config::Config;
use crate::platform::{DataStores, ParameterStore, ScheduledTriggers};
use crate::stackref::StackReferenceStore;
use std::time::Duration;
use tokio::time::{Instant, sleep};

use super::error::HookError;

/// Ceiling on the wait for the platform to confirm store deletion.
pub const STORE_WAIT_CEILING: Duration = Duration::from_secs(300);

/// Fixed delay between store-existence polls.
pub const STORE_WAIT_POLL_DELAY: Duration = Duration::from_secs(10);

/// Post-swap teardown of the retiring slot.
///
/// Runs only once AfterAllowTraffic is reached, i.e. traffic already shifted
/// to the new slot. Steps run in strict order, each gating the next:
///
/// 1. read the reference that was active before this call (that slot is now
///    retiring);
/// 2. disable its scheduled trigger (configurable);
/// 3. delete its data store;
/// 4. wait, up to a fixed ceiling, for the platform to confirm the store is
///    gone, so a future deployment cannot race an in-flight deletion;
/// 5. persist the inverse reference as active, so the next cycle targets the
///    now-idle slot.
///
/// A failed step stops the rest; in particular the flip never happens after a
/// partial teardown, so a retried invocation restarts against the same
/// retiring slot.
pub struct Teardown<'a, P, T, D> {
    refs: &'a StackReferenceStore<P>,
    triggers: &'a T,
    stores: &'a D,
    config: &'a Config,
}

impl<'a, P, T, D> Teardown<'a, P, T, D>
where
    P: ParameterStore,
    T: ScheduledTriggers,
    D: DataStores,
{
    pub fn new(
        refs: &'a StackReferenceStore<P>,
        triggers: &'a T,
        stores: &'a D,
        config: &'a Config,
    ) -> Self {
        Self {
            refs,
            triggers,
            stores,
            config,
        }
    }

    pub async fn run(&self) -> Result<(), HookError> {
        // Traffic has already shifted, so the recorded active slot is the one
        // now retiring. Only this slot's resources are touched.
        let retiring = self.refs.get_active().await?;
        let resources = self.config.slot_resources(retiring);
        tracing::info!(retiring = %retiring, "starting post-swap teardown");

        if self.config.disable_retiring_trigger {
            self.triggers
                .disable_trigger(&resources.trigger_name)
                .await
                .map_err(|source| HookError::TriggerDisable {
                    name: resources.trigger_name.clone(),
                    source,
                })?;
            tracing::info!(trigger = %resources.trigger_name, "disabled retiring trigger");
        }

        self.stores
            .delete_store(&resources.store_name)
            .await
            .map_err(|source| HookError::StoreDelete {
                name: resources.store_name.clone(),
                source,
            })?;

        self.wait_store_absent(&resources.store_name).await?;
        tracing::info!(store = %resources.store_name, "retiring store deleted");

        self.refs.set_active(retiring.invert()).await?;
        Ok(())
    }

    /// Poll until the store no longer exists, bounded by the fixed ceiling.
    /// This deadline is independent of the invocation budget and of the
    /// submission deadline.
    async fn wait_store_absent(&self, name: &str) -> Result<(), HookError> {
        let deadline = Instant::now() + STORE_WAIT_CEILING;

        loop {
            let exists =
                self.stores
                    .store_exists(name)
                    .await
                    .map_err(|source| HookError::StoreWait {
                        name: name.to_string(),
                        source,
                    })?;

            if !exists {
                return Ok(());
            }

            if Instant::now() + STORE_WAIT_POLL_DELAY >= deadline {
                return Err(HookError::StoreWaitTimeout {
                    name: name.to_string(),
                    ceiling_secs: STORE_WAIT_CEILING.as_secs(),
                });
            }

            sleep(STORE_WAIT_POLL_DELAY).await;
        }
    }
}
