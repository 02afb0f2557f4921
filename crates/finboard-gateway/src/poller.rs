//! Background polling of the categorization progress endpoint

use std::sync::Arc;
use std::time::Duration;

use finboard_core::{PollStep, ProgressIndicator};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::RecordGateway;

/// Running poll. Dropping it stops the task.
#[derive(Debug)]
pub struct PollHandle {
    receiver: watch::Receiver<ProgressIndicator>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Last published indicator
    pub fn current(&self) -> ProgressIndicator {
        *self.receiver.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressIndicator> {
        self.receiver.clone()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct ProgressPoller;

impl ProgressPoller {
    /// Poll `gateway.progress()` every `interval` until the job is done or a fetch fails.
    ///
    /// The first fetch happens one interval after start. A slow fetch delays
    /// the next tick instead of overlapping it.
    pub fn start(
        gateway: Arc<dyn RecordGateway>,
        interval: Duration,
        last: ProgressIndicator,
    ) -> PollHandle {
        let mut indicator = last;
        indicator.start();
        let (sender, receiver) = watch::channel(indicator);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;

            log::info!("Polling categorization progress every {:?}", interval);
            loop {
                ticker.tick().await;
                match gateway.progress().await {
                    Ok(snapshot) => {
                        log::debug!("Progress {}/{}", snapshot.current, snapshot.total);
                        let step = indicator.apply(&snapshot);
                        sender.send_replace(indicator);
                        if step == PollStep::Finished {
                            log::info!("Categorization progress finished at {}", indicator.label());
                            break;
                        }
                    }
                    Err(e) => {
                        log::error!("Stopped polling categorization progress: {}", e);
                        indicator.fail();
                        sender.send_replace(indicator);
                        break;
                    }
                }
            }
        });

        PollHandle { receiver, task }
    }
}
