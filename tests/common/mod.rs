#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lazyscript::{Event, EventKind, Host, HostError, Loader, LoaderConfig, Mount, ScriptElement, Subscribe};

/// How a scripted source behaves on every attempt.
#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    Load,
    Fail,
    /// Fails the first `n` attempts, then loads.
    FailTimes(u32),
    /// Never signals.
    Hang,
}

/// Host double: per-source behavior, a fixed latency and a log of every load call.
pub struct ScriptedHost {
    latency: Duration,
    default: Behavior,
    behaviors: HashMap<String, Behavior>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedHost {
    pub fn new(default: Behavior) -> Self {
        Self {
            latency: Duration::from_millis(5),
            default,
            behaviors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, src: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(src.to_owned(), behavior);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, src: &str) -> usize {
        self.calls().iter().filter(|(s, _)| s == src).count()
    }
}

#[async_trait]
impl Host for ScriptedHost {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn load(&self, script: Arc<ScriptElement>) -> Result<(), HostError> {
        self.calls
            .lock()
            .unwrap()
            .push((script.src().to_owned(), script.attempt()));
        let behavior = self
            .behaviors
            .get(script.src())
            .copied()
            .unwrap_or(self.default);

        if let Behavior::Hang = behavior {
            futures::future::pending::<()>().await;
        }
        tokio::time::sleep(self.latency).await;

        match behavior {
            Behavior::Load => Ok(()),
            Behavior::Fail => Err(HostError::new(format!("404 {}#{}", script.src(), script.attempt()))),
            Behavior::FailTimes(n) if script.attempt() < n => {
                Err(HostError::new(format!("503 {}#{}", script.src(), script.attempt())))
            }
            Behavior::FailTimes(_) => Ok(()),
            Behavior::Hang => unreachable!(),
        }
    }
}

/// Subscriber collecting every event it sees.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events().iter().filter(|e| e.kind == kind).count()
    }
}

impl Subscribe for Recorder {
    fn on_event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Loader on a private mount with a recorder subscribed.
pub fn loader(cfg: LoaderConfig, host: Arc<ScriptedHost>) -> (Loader, Arc<Recorder>) {
    init_tracing();
    let recorder = Arc::new(Recorder::default());
    let loader = Loader::builder(cfg, host)
        .with_mount(Mount::arc())
        .with_subscribers(vec![recorder.clone() as Arc<dyn Subscribe>])
        .build();
    (loader, recorder)
}

pub fn fast(max_retries: u32) -> LoaderConfig {
    LoaderConfig::default()
        .with_max_retries(max_retries)
        .with_retry_delay_secs(0.01)
}
