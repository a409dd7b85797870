// ABOUTME: In-memory doubles for the platform collaborator traits.
// ABOUTME: Cheap to clone; clones share state so tests can inspect after handing ownership over.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cutover::platform::{
    CallbackTransport, DataStores, DeploymentEngine, DeploymentRequest, EngineError,
    FunctionAliases, FunctionError, HealthProbe, LifecycleStatus, ParameterError, ParameterStore,
    ProbeError, ScheduledTriggers, StoreError, TaskTemplateSpec, TaskTemplates, TemplateError,
    TransportError, TriggerError,
};
use cutover::types::{DeploymentId, FunctionVersion, LifecycleExecutionId, TaskTemplateId};

/// Shared ordered log of platform calls, for cross-double ordering assertions.
#[derive(Clone, Default)]
pub struct OpLog(Arc<Mutex<Vec<String>>>);

impl OpLog {
    pub fn record(&self, op: impl Into<String>) {
        self.0.lock().unwrap().push(op.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

/// In-memory parameter service.
#[derive(Clone, Default)]
pub struct InMemoryParameters {
    values: Arc<Mutex<HashMap<String, String>>>,
    log: OpLog,
}

impl InMemoryParameters {
    pub fn with_value(name: &str, value: &str) -> Self {
        let store = Self::default();
        store.set(name, value);
        store
    }

    pub fn with_log(mut self, log: OpLog) -> Self {
        self.log = log;
        self
    }

    /// Mutate the backing value out of band, as another writer would.
    pub fn set(&self, name: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.values.lock().unwrap().get(name).cloned()
    }
}

#[async_trait]
impl ParameterStore for InMemoryParameters {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError> {
        self.log.record(format!("param.get {name}"));
        self.values
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ParameterError::NotFound(name.to_string()))
    }

    async fn put_parameter(&self, name: &str, value: &str) -> Result<(), ParameterError> {
        self.log.record(format!("param.put {name}={value}"));
        self.set(name, value);
        Ok(())
    }
}

/// Parameter service whose reads always fail.
#[derive(Clone, Default)]
pub struct FailingParameters;

#[async_trait]
impl ParameterStore for FailingParameters {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError> {
        Err(ParameterError::Service(format!("read of {name} refused")))
    }

    async fn put_parameter(&self, _name: &str, _value: &str) -> Result<(), ParameterError> {
        Err(ParameterError::Service("write refused".to_string()))
    }
}

/// Deployment engine with scripted submission results and recorded reports.
#[derive(Clone, Default)]
pub struct FakeEngine {
    submissions: Arc<Mutex<VecDeque<Result<String, EngineError>>>>,
    requests: Arc<Mutex<Vec<DeploymentRequest>>>,
    reports: Arc<Mutex<Vec<(String, String, LifecycleStatus)>>>,
    report_error: Arc<Mutex<Option<EngineError>>>,
    log: OpLog,
}

impl FakeEngine {
    /// Every submission succeeds with `deployment_id`.
    pub fn accepting(deployment_id: &str) -> Self {
        let engine = Self::default();
        engine.push_success(deployment_id);
        engine
    }

    pub fn with_log(mut self, log: OpLog) -> Self {
        self.log = log;
        self
    }

    pub fn push_success(&self, deployment_id: &str) {
        self.submissions
            .lock()
            .unwrap()
            .push_back(Ok(deployment_id.to_string()));
    }

    pub fn push_rejections(&self, count: usize, reason: &str) {
        let mut scripted = self.submissions.lock().unwrap();
        for _ in 0..count {
            scripted.push_back(Err(EngineError::SubmissionRejected(reason.to_string())));
        }
    }

    pub fn push_empty_id(&self) {
        self.submissions.lock().unwrap().push_back(Ok(String::new()));
    }

    /// Make the next status report fail with `error`.
    pub fn fail_next_report(&self, error: EngineError) {
        *self.report_error.lock().unwrap() = Some(error);
    }

    pub fn submitted_requests(&self) -> Vec<DeploymentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<(String, String, LifecycleStatus)> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeploymentEngine for FakeEngine {
    async fn create_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentId, EngineError> {
        self.log.record("engine.create_deployment");
        self.requests.lock().unwrap().push(request.clone());

        let mut scripted = self.submissions.lock().unwrap();
        // The last scripted result repeats, so "always rejects" needs one entry.
        let result = if scripted.len() > 1 {
            scripted.pop_front().unwrap()
        } else {
            match scripted.front() {
                Some(Ok(id)) => Ok(id.clone()),
                Some(Err(EngineError::SubmissionRejected(r))) => {
                    Err(EngineError::SubmissionRejected(r.clone()))
                }
                Some(Err(EngineError::Throttled(r))) => Err(EngineError::Throttled(r.clone())),
                Some(Err(EngineError::MissingDeploymentId)) => {
                    Err(EngineError::MissingDeploymentId)
                }
                Some(Err(EngineError::Service(r))) => Err(EngineError::Service(r.clone())),
                None => Err(EngineError::Service("no scripted submission".to_string())),
            }
        };
        result.map(DeploymentId::new)
    }

    async fn put_lifecycle_status(
        &self,
        deployment_id: &DeploymentId,
        execution_id: &LifecycleExecutionId,
        status: LifecycleStatus,
    ) -> Result<(), EngineError> {
        self.log
            .record(format!("engine.report {}", status.as_str()));
        if let Some(error) = self.report_error.lock().unwrap().take() {
            return Err(error);
        }
        self.reports.lock().unwrap().push((
            deployment_id.as_str().to_string(),
            execution_id.as_str().to_string(),
            status,
        ));
        Ok(())
    }
}

/// Task-template registry recording every registered spec, with an optional
/// scripted serving template per cluster/family pair.
#[derive(Clone, Default)]
pub struct FakeTemplates {
    registered: Arc<Mutex<Vec<TaskTemplateSpec>>>,
    serving: Arc<Mutex<HashMap<String, TaskTemplateSpec>>>,
    log: OpLog,
}

impl FakeTemplates {
    pub fn with_log(mut self, log: OpLog) -> Self {
        self.log = log;
        self
    }

    pub fn registered(&self) -> Vec<TaskTemplateSpec> {
        self.registered.lock().unwrap().clone()
    }

    /// Script the template currently serving `family` in `cluster`.
    pub fn set_serving(&self, cluster: &str, family: &str, spec: TaskTemplateSpec) {
        self.serving
            .lock()
            .unwrap()
            .insert(format!("{cluster}/{family}"), spec);
    }
}

#[async_trait]
impl TaskTemplates for FakeTemplates {
    async fn register_template(
        &self,
        spec: &TaskTemplateSpec,
    ) -> Result<TaskTemplateId, TemplateError> {
        self.log.record(format!("templates.register {}", spec.family));
        let mut registered = self.registered.lock().unwrap();
        registered.push(spec.clone());
        Ok(TaskTemplateId::new(format!(
            "template/{}:{}",
            spec.family,
            registered.len()
        )))
    }

    async fn serving_template(
        &self,
        cluster: &str,
        family: &str,
    ) -> Result<Option<TaskTemplateSpec>, TemplateError> {
        self.log.record(format!("templates.serving {cluster}/{family}"));
        Ok(self
            .serving
            .lock()
            .unwrap()
            .get(&format!("{cluster}/{family}"))
            .cloned())
    }
}

/// Function alias lookup returning one fixed version.
#[derive(Clone)]
pub struct FakeAliases {
    version: String,
    log: OpLog,
}

impl FakeAliases {
    pub fn serving(version: &str) -> Self {
        Self {
            version: version.to_string(),
            log: OpLog::default(),
        }
    }

    pub fn with_log(mut self, log: OpLog) -> Self {
        self.log = log;
        self
    }
}

#[async_trait]
impl FunctionAliases for FakeAliases {
    async fn current_version(
        &self,
        function: &str,
        alias: &str,
    ) -> Result<FunctionVersion, FunctionError> {
        self.log.record(format!("aliases.current {function}/{alias}"));
        Ok(FunctionVersion::new(self.version.clone()))
    }
}

/// Scheduled-trigger control recording disables, optionally failing once.
#[derive(Clone, Default)]
pub struct FakeTriggers {
    disabled: Arc<Mutex<Vec<String>>>,
    fail_next: Arc<Mutex<Option<TriggerError>>>,
    log: OpLog,
}

impl FakeTriggers {
    pub fn with_log(mut self, log: OpLog) -> Self {
        self.log = log;
        self
    }

    pub fn fail_next(&self, error: TriggerError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn disabled(&self) -> Vec<String> {
        self.disabled.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScheduledTriggers for FakeTriggers {
    async fn disable_trigger(&self, name: &str) -> Result<(), TriggerError> {
        self.log.record(format!("triggers.disable {name}"));
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        self.disabled.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

/// Data-store service with scripted deletion latency.
///
/// A store deleted with `gone_after(name, n)` keeps existing for the first
/// `n` existence polls, then reads as gone. `never_gone` stores exist forever.
#[derive(Clone, Default)]
pub struct FakeStores {
    remaining_polls: Arc<Mutex<HashMap<String, Option<u32>>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    log: OpLog,
}

impl FakeStores {
    pub fn with_log(mut self, log: OpLog) -> Self {
        self.log = log;
        self
    }

    pub fn gone_after(&self, name: &str, polls: u32) {
        self.remaining_polls
            .lock()
            .unwrap()
            .insert(name.to_string(), Some(polls));
    }

    pub fn never_gone(&self, name: &str) {
        self.remaining_polls
            .lock()
            .unwrap()
            .insert(name.to_string(), None);
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataStores for FakeStores {
    async fn delete_store(&self, name: &str) -> Result<(), StoreError> {
        self.log.record(format!("stores.delete {name}"));
        self.deleted.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn store_exists(&self, name: &str) -> Result<bool, StoreError> {
        self.log.record(format!("stores.exists {name}"));
        let mut remaining = self.remaining_polls.lock().unwrap();
        match remaining.get_mut(name) {
            Some(None) => Ok(true),
            Some(Some(0)) => Ok(false),
            Some(Some(polls)) => {
                *polls -= 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Health probe returning scripted statuses and recording poll instants.
///
/// The last scripted response repeats, so a single `Ok(503)` models an
/// endpoint that never becomes ready.
#[derive(Clone, Default)]
pub struct ScriptedProbe {
    responses: Arc<Mutex<VecDeque<Result<u16, String>>>>,
    polls: Arc<Mutex<Vec<tokio::time::Instant>>>,
}

impl ScriptedProbe {
    pub fn returning(statuses: &[u16]) -> Self {
        let probe = Self::default();
        for status in statuses {
            probe.push_status(*status);
        }
        probe
    }

    pub fn push_status(&self, status: u16) {
        self.responses.lock().unwrap().push_back(Ok(status));
    }

    pub fn push_failure(&self, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
    }

    pub fn poll_instants(&self) -> Vec<tokio::time::Instant> {
        self.polls.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.lock().unwrap().len()
    }
}

#[async_trait]
impl HealthProbe for ScriptedProbe {
    async fn probe(&self, _url: &str) -> Result<u16, ProbeError> {
        self.polls.lock().unwrap().push(tokio::time::Instant::now());
        let mut scripted = self.responses.lock().unwrap();
        let result = if scripted.len() > 1 {
            scripted.pop_front().unwrap()
        } else {
            scripted
                .front()
                .cloned()
                .unwrap_or_else(|| Err("no scripted response".to_string()))
        };
        result.map_err(ProbeError::Request)
    }
}

/// Callback transport capturing every PUT, optionally failing.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    puts: Arc<Mutex<Vec<(String, String)>>>,
    fail_next: Arc<Mutex<Option<TransportError>>>,
}

impl RecordingTransport {
    pub fn fail_next(&self, error: TransportError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn puts(&self) -> Vec<(String, String)> {
        self.puts.lock().unwrap().clone()
    }

    /// The parsed body of the only delivered callback.
    pub fn only_payload(&self) -> serde_json::Value {
        let puts = self.puts();
        assert_eq!(puts.len(), 1, "expected exactly one callback, got {puts:?}");
        serde_json::from_str(&puts[0].1).unwrap()
    }
}

#[async_trait]
impl CallbackTransport for RecordingTransport {
    async fn put(&self, url: &str, body: &str) -> Result<(), TransportError> {
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        self.puts
            .lock()
            .unwrap()
            .push((url.to_string(), body.to_string()));
        Ok(())
    }
}
