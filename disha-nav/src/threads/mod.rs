//! Multi-threaded replay for DishaNav.
//!
//! Separates concerns into two threads:
//! - Sampler thread: replays trace samples at the configured rate
//! - Guidance thread: pose pipeline, waypoint recording and navigation
//!
//! Samples flow through a bounded channel, so the guidance side sees every
//! sample exactly once and in order.

mod guidance;
mod sampler;

pub use guidance::GuidanceThread;
pub use sampler::SamplerThread;

use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use marga::PoseSample;

use crate::config::DishaConfig;
use crate::error::Result;
use crate::shared::SharedState;
use crate::trace::{Trace, TraceEvent};

/// One replayed sample
#[derive(Clone, Debug)]
pub struct SampleMsg {
    /// Position in the trace
    pub index: usize,
    pub pose: PoseSample,
    pub events: Vec<TraceEvent>,
}

/// Thread handles for the replay.
pub struct ThreadHandles {
    pub sampler: JoinHandle<()>,
    pub guidance: JoinHandle<()>,
}

/// Spawn both threads and return handles.
pub fn spawn_threads(
    config: &DishaConfig,
    trace: Trace,
    shared_state: Arc<SharedState>,
) -> Result<ThreadHandles> {
    let (sample_tx, sample_rx) = mpsc::sync_channel::<SampleMsg>(config.sampler.queue_depth);

    let sampler_state = Arc::clone(&shared_state);
    let guidance_state = Arc::clone(&shared_state);
    let interval = config.sampler.interval();

    let sampler = thread::Builder::new()
        .name("sampler".into())
        .spawn(move || {
            let mut sampler_thread = SamplerThread::new(trace, interval, sampler_state, sample_tx);
            sampler_thread.run();
        })?;

    let guidance = thread::Builder::new()
        .name("guidance".into())
        .spawn(move || {
            let mut guidance_thread = GuidanceThread::new(guidance_state, sample_rx);
            guidance_thread.run();
        })?;

    Ok(ThreadHandles { sampler, guidance })
}
