use crate::frame::Frame;

/// Coalesces projection requests to at most one run per rendering frame.
///
/// Sensor updates arrive far faster than the display refreshes; each one
/// calls [`request`](Self::request), and the render loop calls
/// [`take`](Self::take) once per frame. Any number of requests between two
/// frames collapses into a single run, and a request arriving after this
/// frame's run already happened stays pending for the next frame.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectionPump {
    pending: bool,
    last_run: Option<u64>,
}

impl ProjectionPump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark that the projected output is stale.
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Claim the run for this frame. Returns `true` at most once per frame
    /// index, and only while a request is pending.
    pub fn take(&mut self, frame: Frame) -> bool {
        if !self.pending || self.last_run == Some(frame.index) {
            return false;
        }
        self.pending = false;
        self.last_run = Some(frame.index);
        true
    }
}
