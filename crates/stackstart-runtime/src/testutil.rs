//! Scripted `StackApi` and `Notifier` doubles that write to one shared
//! trace, so tests can assert on the interleaving of API calls and events.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use secrecy::SecretString;
use serde_json::json;

use stackstart_core::{ApiError, Event, Notifier, Stack, StackApi, StackId, WebhookError};
use stackstart_settings::Settings;

pub fn settings(sequence: &[StackId]) -> Settings {
    Settings {
        base_url: "http://portainer.test".into(),
        api_key: SecretString::from("test-key"),
        stack_sequence: sequence.to_vec(),
        webhook_url: None,
        poll_interval_seconds: 5,
        poll_timeout_seconds: 300,
        verify_tls: true,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TraceEntry {
    Fetch(StackId),
    Stop(StackId, i64),
    Start(StackId, i64),
    Notify(Event),
}

impl TraceEntry {
    fn stack_id(&self) -> Option<StackId> {
        match self {
            Self::Fetch(id) | Self::Stop(id, _) | Self::Start(id, _) => Some(*id),
            Self::Notify(event) => event.stack_id(),
        }
    }
}

#[derive(Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<TraceEntry>>>);

impl Trace {
    fn push(&self, entry: TraceEntry) {
        self.0.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<TraceEntry> {
        self.0.lock().clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.0
            .lock()
            .iter()
            .filter_map(|e| match e {
                TraceEntry::Notify(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    /// Stack ids of start calls, in call order.
    pub fn started(&self) -> Vec<StackId> {
        self.0
            .lock()
            .iter()
            .filter_map(|e| match e {
                TraceEntry::Start(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Whether anything (API call or event) referenced this stack.
    pub fn touched(&self, id: StackId) -> bool {
        self.0.lock().iter().any(|e| e.stack_id() == Some(id))
    }
}

/// Script for one fake stack.
#[derive(Clone, Debug)]
pub struct FakeStack {
    endpoint_id: Option<i64>,
    initially_running: bool,
    comes_up: bool,
    /// Non-running polls to serve after a start before reporting running.
    delay_polls: u32,
    fail_start: bool,
    fail_stop: bool,
}

impl FakeStack {
    pub fn stopped(endpoint_id: i64) -> Self {
        Self {
            endpoint_id: Some(endpoint_id),
            initially_running: false,
            comes_up: true,
            delay_polls: 0,
            fail_start: false,
            fail_stop: false,
        }
    }

    pub fn running(endpoint_id: i64) -> Self {
        Self {
            initially_running: true,
            ..Self::stopped(endpoint_id)
        }
    }

    pub fn without_endpoint() -> Self {
        Self {
            endpoint_id: None,
            ..Self::stopped(0)
        }
    }

    pub fn never_comes_up(mut self) -> Self {
        self.comes_up = false;
        self
    }

    pub fn comes_up_after(mut self, polls: u32) -> Self {
        self.delay_polls = polls;
        self
    }

    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn failing_stop(mut self) -> Self {
        self.fail_stop = true;
        self
    }
}

struct FakeState {
    script: FakeStack,
    running: bool,
    started: bool,
    polls_since_start: u32,
}

pub struct FakeApi {
    trace: Trace,
    stacks: Mutex<HashMap<StackId, FakeState>>,
}

impl FakeApi {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            stacks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_stack(self, id: StackId, script: FakeStack) -> Self {
        self.stacks.lock().insert(
            id,
            FakeState {
                running: script.initially_running,
                script,
                started: false,
                polls_since_start: 0,
            },
        );
        self
    }

    fn server_error(id: StackId, action: &str) -> ApiError {
        ApiError::Status {
            status: 500,
            url: format!("http://portainer.test/api/stacks/{id}/{action}"),
            body: format!("{action} failed"),
        }
    }
}

#[async_trait]
impl StackApi for FakeApi {
    async fn fetch_stack(&self, id: StackId) -> Result<Stack, ApiError> {
        self.trace.push(TraceEntry::Fetch(id));
        let mut stacks = self.stacks.lock();
        let Some(state) = stacks.get_mut(&id) else {
            return Err(ApiError::Status {
                status: 404,
                url: format!("http://portainer.test/api/stacks/{id}"),
                body: "not found".into(),
            });
        };

        if state.started {
            state.polls_since_start += 1;
            state.running =
                state.script.comes_up && state.polls_since_start > state.script.delay_polls;
        }

        Ok(Stack {
            id: Some(id),
            name: Some(format!("stack-{id}")),
            status: Some(json!(if state.running { 1 } else { 2 })),
            endpoint_id: state.script.endpoint_id,
        })
    }

    async fn start_stack(&self, id: StackId, endpoint_id: i64) -> Result<(), ApiError> {
        self.trace.push(TraceEntry::Start(id, endpoint_id));
        let mut stacks = self.stacks.lock();
        let state = stacks.get_mut(&id).expect("start on unknown stack");
        if state.script.fail_start {
            return Err(Self::server_error(id, "start"));
        }
        state.started = true;
        state.polls_since_start = 0;
        Ok(())
    }

    async fn stop_stack(&self, id: StackId, endpoint_id: i64) -> Result<(), ApiError> {
        self.trace.push(TraceEntry::Stop(id, endpoint_id));
        let mut stacks = self.stacks.lock();
        let state = stacks.get_mut(&id).expect("stop on unknown stack");
        if state.script.fail_stop {
            return Err(Self::server_error(id, "stop"));
        }
        state.running = false;
        Ok(())
    }
}

/// Records every event; optionally fails each delivery afterwards.
pub struct RecordingNotifier {
    trace: Trace,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            fail: false,
        }
    }

    pub fn failing(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            fail: true,
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &Event) -> Result<(), WebhookError> {
        self.trace.push(TraceEntry::Notify(event.clone()));
        if self.fail {
            return Err(WebhookError::Transport("connection refused".into()));
        }
        Ok(())
    }
}
