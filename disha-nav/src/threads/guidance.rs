//! Guidance thread: pose pipeline, waypoint recording and navigation.
//!
//! For every sample received from the sampler:
//! 1. Project the local pose to planar ENU (heading lock applied)
//! 2. Move the recorder to that position
//! 3. Apply the sample's operator events
//! 4. Report the position to the navigation session if a route is active
//!
//! A route starts where the user stands when `navigate` fires. Positions fed
//! to the session are taken relative to that point, matching a fresh tracking
//! session that starts on the first waypoint of the route.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use log::{debug, info, warn};
use marga::{
    EnuVector, NavigationState, PosePipeline, WaypointGraph, WaypointId, WaypointRecorder,
    find_path, route_length,
};

use super::SampleMsg;
use crate::error::{DishaError, Result};
use crate::shared::SharedState;
use crate::trace::TraceEvent;

/// Per-sample processing, independent of the thread plumbing.
pub struct GuidanceProcessor {
    shared_state: Arc<SharedState>,
    pipeline: PosePipeline,
    recorder: WaypointRecorder,
    /// Position where the active route started
    route_origin: EnuVector,
}

impl GuidanceProcessor {
    pub fn new(shared_state: Arc<SharedState>) -> Self {
        Self {
            shared_state,
            pipeline: PosePipeline::new(),
            recorder: WaypointRecorder::new(),
            route_origin: EnuVector::ZERO,
        }
    }

    pub fn recorder(&self) -> &WaypointRecorder {
        &self.recorder
    }

    /// Process one sample
    pub fn process(&mut self, msg: &SampleMsg) {
        let position = self.pipeline.project(&msg.pose);
        self.recorder.update_position(position);

        for event in &msg.events {
            if let Err(e) = self.apply(event) {
                warn!("Sample {}: {:?} failed: {}", msg.index, event, e);
            }
        }

        if self.shared_state.snapshot().state == NavigationState::Active {
            let relative = position - self.route_origin;
            let update = self.shared_state.session().report_position(relative);
            self.shared_state.push_trajectory(relative);
            if update.advanced {
                self.shared_state.arrivals.fetch_add(1, Ordering::Relaxed);
            }
        }

        self.shared_state.increment_sample_count();
    }

    fn apply(&mut self, event: &TraceEvent) -> Result<()> {
        debug!("Event {:?}", event);
        match event {
            TraceEvent::StartTextScan => self.recorder.texts_mut().start_scanning(),
            TraceEvent::StopTextScan => self.recorder.texts_mut().stop_scanning(),
            TraceEvent::ObserveText { text } => {
                self.recorder.texts_mut().observe(text.as_str());
            }
            TraceEvent::RecordWaypoint { name } => {
                let mut graph = self.shared_state.graph().write();
                self.recorder.record(&mut graph, name.as_str())?;
            }
            TraceEvent::ResetAnchor => self.recorder.reset_anchor(),
            TraceEvent::ResumeFrom { name } => {
                let id = resolve(&self.shared_state.graph().read(), name)?;
                self.recorder.resume_from(id);
            }
            TraceEvent::Navigate { to, from } => self.navigate(to, from.as_deref())?,
            TraceEvent::ResetNavigation => {
                self.shared_state.session().reset();
                self.shared_state.clear_route();
            }
            TraceEvent::RestartTracking => {
                info!("Tracking restarted, heading lock released");
                self.pipeline.restart();
            }
            TraceEvent::ResetAll => {
                self.shared_state.session().reset();
                self.shared_state.clear_route();
                let mut graph = self.shared_state.graph().write();
                self.recorder.reset(&mut graph);
                self.pipeline.restart();
                self.route_origin = EnuVector::ZERO;
            }
        }
        Ok(())
    }

    fn navigate(&mut self, to: &str, from: Option<&str>) -> Result<()> {
        let (path, length) = {
            let graph = self.shared_state.graph().read();
            let start = match from {
                Some(term) => resolve(&graph, term)?,
                None => graph
                    .first_id()
                    .ok_or_else(|| DishaError::Trace("No waypoints recorded".into()))?,
            };
            let destination = resolve(&graph, to)?;
            let path = find_path(&graph, start, destination)?;
            let length = route_length(&graph, &path)?;
            (path, length)
        };

        info!(
            "Route to '{}': {} waypoints, {:.1}m",
            to,
            path.len(),
            length
        );
        self.route_origin = self.recorder.position();
        self.shared_state.session().start(path.clone())?;
        self.shared_state.set_route(path);
        Ok(())
    }
}

/// Find a waypoint by exact name, then by text search
fn resolve(graph: &WaypointGraph, term: &str) -> Result<WaypointId> {
    if let Some(id) = graph.find_by_name(term) {
        return Ok(id);
    }
    graph
        .search_texts(term)
        .first()
        .map(|hit| hit.waypoint)
        .ok_or_else(|| DishaError::Trace(format!("No waypoint matches '{}'", term)))
}

/// Guidance thread state and logic.
pub struct GuidanceThread {
    shared_state: Arc<SharedState>,
    sample_rx: Receiver<SampleMsg>,
    processor: GuidanceProcessor,
}

impl GuidanceThread {
    pub fn new(shared_state: Arc<SharedState>, sample_rx: Receiver<SampleMsg>) -> Self {
        Self {
            processor: GuidanceProcessor::new(Arc::clone(&shared_state)),
            shared_state,
            sample_rx,
        }
    }

    /// Run the guidance thread main loop.
    pub fn run(&mut self) {
        info!("Guidance thread started");

        loop {
            if self.shared_state.should_shutdown() {
                info!("Guidance thread shutting down");
                break;
            }

            match self.sample_rx.recv_timeout(Duration::from_millis(100)) {
                Ok(msg) => self.processor.process(&msg),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    info!(
                        "Replay drained after {} samples",
                        self.shared_state.samples_processed()
                    );
                    self.shared_state.mark_replay_complete();
                    break;
                }
            }
        }
    }
}
