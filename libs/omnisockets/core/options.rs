use crate::traits::engine::NetworkEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// One-shot delayed task runner backed by an injected tokio handle
///
/// Owned by [`Options`] and shared between the transports of one socket;
/// never process-wide state.
pub struct Scheduler {
    handle: Handle,
}

impl Scheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime of the calling task
    ///
    /// # Panics
    /// Panics outside a tokio runtime context, like `Handle::current`.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Run `task` once after `delay`
    pub fn schedule(
        &self,
        delay: Duration,
        task: impl FnOnce() + Send + 'static,
    ) -> ScheduledTask {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        ScheduledTask { join }
    }
}

/// Handle to a pending scheduled task
pub struct ScheduledTask {
    join: JoinHandle<()>,
}

impl ScheduledTask {
    /// Abort the task if it has not fired yet
    pub fn cancel(&self) {
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Per-socket options governing reconnection and shared resources
#[derive(Clone)]
pub struct Options {
    reconnect: bool,
    reconnect_delay: Duration,
    scheduler: Arc<Scheduler>,
    runtime: Arc<dyn NetworkEngine>,
}

impl Options {
    pub fn builder(runtime: Arc<dyn NetworkEngine>, scheduler: Arc<Scheduler>) -> OptionsBuilder {
        OptionsBuilder {
            reconnect: true,
            reconnect_delay: Duration::ZERO,
            scheduler,
            runtime,
        }
    }

    /// Whether a dropped connection should be re-established
    pub fn reconnect(&self) -> bool {
        self.reconnect
    }

    /// Delay before a reconnect attempt; zero means a synchronous retry
    /// on the thread that observed the close
    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The network engine connection attempts are submitted to
    pub fn runtime(&self) -> &Arc<dyn NetworkEngine> {
        &self.runtime
    }
}

/// Fluent builder for [`Options`]
pub struct OptionsBuilder {
    reconnect: bool,
    reconnect_delay: Duration,
    scheduler: Arc<Scheduler>,
    runtime: Arc<dyn NetworkEngine>,
}

impl OptionsBuilder {
    pub fn reconnect(mut self, enabled: bool) -> Self {
        self.reconnect = enabled;
        self
    }

    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn build(self) -> Options {
        Options {
            reconnect: self.reconnect,
            reconnect_delay: self.reconnect_delay,
            scheduler: self.scheduler,
            runtime: self.runtime,
        }
    }
}
