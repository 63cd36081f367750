//! Recompute loop driven by parameter-change events.
//!
//! A worker thread owns the working snapshot. Each wake-up drains every
//! change already queued, applies them in order and computes one frame, so
//! bursts from a dragged control collapse into a single recomputation.

use crate::dsp::engine::{SweepEngine, SweepOutput};
use crate::dsp::params::Parameters;
use crate::settings::ParameterChange;
use anyhow::{Result, anyhow};
use async_channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

const CHANGE_CAPACITY: usize = 64;
const FRAME_CAPACITY: usize = 4;

#[derive(Debug)]
pub struct SessionHandle {
    changes: Sender<ParameterChange>,
    frames: Receiver<SweepOutput>,
    worker: JoinHandle<Parameters>,
}

pub fn spawn(engine: SweepEngine, params: Parameters) -> std::io::Result<SessionHandle> {
    let (change_tx, change_rx) = async_channel::bounded(CHANGE_CAPACITY);
    let (frame_tx, frame_rx) = async_channel::bounded(FRAME_CAPACITY);
    let worker = thread::Builder::new()
        .name("sweepscope-session".into())
        .spawn(move || run(Session::new(engine, params), change_rx, frame_tx))?;

    Ok(SessionHandle {
        changes: change_tx,
        frames: frame_rx,
        worker,
    })
}

impl SessionHandle {
    pub fn send(&self, change: ParameterChange) -> Result<()> {
        self.changes
            .send_blocking(change)
            .map_err(|_| anyhow!("session worker has stopped"))
    }

    pub fn frames(&self) -> &Receiver<SweepOutput> {
        &self.frames
    }

    /// Stops accepting changes. Queued changes are still applied and the
    /// frame channel closes once the worker drains them.
    pub fn close(&self) {
        self.changes.close();
    }

    /// Stops the worker and returns its final snapshot.
    pub fn join(self) -> Result<Parameters> {
        self.changes.close();
        self.frames.close();
        self.worker
            .join()
            .map_err(|_| anyhow!("session worker panicked"))
    }
}

#[derive(Debug)]
struct Session {
    engine: SweepEngine,
    params: Parameters,
    last_frame: Option<SweepOutput>,
}

impl Session {
    fn new(engine: SweepEngine, params: Parameters) -> Self {
        Self {
            engine,
            params,
            last_frame: None,
        }
    }

    fn apply(&mut self, change: ParameterChange) {
        change.apply(&mut self.params);
    }

    /// Returns `None` when the result matches what was last emitted.
    fn recompute(&mut self) -> Option<SweepOutput> {
        let frame = self.engine.compute(&self.params);
        if self.last_frame.as_ref() == Some(&frame) {
            return None;
        }
        self.last_frame = Some(frame.clone());
        Some(frame)
    }
}

fn run(
    mut session: Session,
    changes: Receiver<ParameterChange>,
    frames: Sender<SweepOutput>,
) -> Parameters {
    info!("[session] started");

    let mut pending = session.recompute();
    loop {
        if let Some(frame) = pending.take() {
            if frames.send_blocking(frame).is_err() {
                info!("[session] frame receiver closed; stopping");
                break;
            }
        }

        let Ok(change) = changes.recv_blocking() else {
            info!("[session] change stream ended");
            break;
        };
        session.apply(change);
        let mut applied = 1usize;
        while let Ok(change) = changes.try_recv() {
            session.apply(change);
            applied += 1;
        }

        pending = session.recompute();
        if pending.is_none() {
            debug!("[session] {applied} change(s) left the frame unchanged");
        } else {
            debug!("[session] recomputed after {applied} change(s)");
        }
    }

    session.params
}
