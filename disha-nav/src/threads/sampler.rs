//! Sampler thread: replays trace samples at a fixed rate.

use std::sync::Arc;
use std::sync::mpsc::{SyncSender, TrySendError};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::SampleMsg;
use crate::shared::SharedState;
use crate::trace::Trace;

/// Sampler thread state and logic.
pub struct SamplerThread {
    trace: Trace,
    interval: Duration,
    shared_state: Arc<SharedState>,
    sample_tx: SyncSender<SampleMsg>,
}

impl SamplerThread {
    pub fn new(
        trace: Trace,
        interval: Duration,
        shared_state: Arc<SharedState>,
        sample_tx: SyncSender<SampleMsg>,
    ) -> Self {
        Self {
            trace,
            interval,
            shared_state,
            sample_tx,
        }
    }

    /// Run the replay loop. Dropping the sender on return tells the guidance
    /// thread that the trace is exhausted.
    pub fn run(&mut self) {
        info!(
            "Sampler thread started: {} samples every {}ms",
            self.trace.samples.len(),
            self.interval.as_millis()
        );

        let mut next_tick = Instant::now();
        for (index, sample) in self.trace.samples.iter().enumerate() {
            if self.shared_state.should_shutdown() {
                info!("Sampler thread shutting down at sample {}", index);
                return;
            }

            let mut msg = SampleMsg {
                index,
                pose: sample.pose(),
                events: sample.events.clone(),
            };

            // Every sample is delivered, in order
            loop {
                match self.sample_tx.try_send(msg) {
                    Ok(()) => break,
                    Err(TrySendError::Full(returned)) => {
                        if self.shared_state.should_shutdown() {
                            return;
                        }
                        debug!("Sample queue full, waiting");
                        msg = returned;
                        std::thread::sleep(Duration::from_millis(5));
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        warn!("Guidance thread gone, sampler exiting");
                        return;
                    }
                }
            }

            next_tick += self.interval;
            let now = Instant::now();
            if next_tick > now {
                std::thread::sleep(next_tick - now);
            }
        }

        info!("Sampler thread finished replay");
    }
}
