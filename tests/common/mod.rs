//! Shared test doubles for lifecycle integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use graceful_shutdown::lifecycle::{Action, BoxError};
use tokio::time::Instant;

/// Calls observed across every recorder sharing the log, in order.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Names of actions whose stop was invoked, in order.
    pub fn stopped(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| e.strip_prefix("stop:").map(str::to_string))
            .collect()
    }
}

/// How a recorder's stop behaves once invoked.
#[derive(Clone, Copy)]
pub enum StopBehavior {
    Succeed,
    Fail,
    Sleep(Duration),
    /// Return `Ok` exactly at the deadline it was given.
    SleepUntilDeadline,
}

/// Action that records its start and stop calls.
pub struct Recorder {
    name: String,
    log: CallLog,
    start_delay: Duration,
    start_error: bool,
    stop: StopBehavior,
}

impl Recorder {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            start_delay: Duration::ZERO,
            start_error: false,
            stop: StopBehavior::Succeed,
        }
    }

    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn failing_start(mut self) -> Self {
        self.start_error = true;
        self
    }

    pub fn stop(mut self, behavior: StopBehavior) -> Self {
        self.stop = behavior;
        self
    }
}

#[async_trait]
impl Action for Recorder {
    async fn start(&self) -> Result<(), BoxError> {
        self.log.push(format!("start:{}", self.name));
        if !self.start_delay.is_zero() {
            tokio::time::sleep(self.start_delay).await;
        }
        if self.start_error {
            return Err(format!("{} cannot start", self.name).into());
        }
        Ok(())
    }

    async fn stop(&self, deadline: Instant) -> Result<(), BoxError> {
        self.log.push(format!("stop:{}", self.name));
        match self.stop {
            StopBehavior::Succeed => Ok(()),
            StopBehavior::Fail => Err(format!("{} refused to stop", self.name).into()),
            StopBehavior::Sleep(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            StopBehavior::SleepUntilDeadline => {
                tokio::time::sleep_until(deadline).await;
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
