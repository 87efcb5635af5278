use std::sync::{Arc, Mutex};

/// Time-domain sample window: one oscilloscope frame worth of bytes.
pub const SCOPE_WINDOW: usize = 2048;
/// Unsigned-byte encoding centers silence at 128.
pub const SILENCE: u8 = 128;
pub const DEFAULT_INTERVAL_MS: u32 = 30;

pub fn sample_to_byte(sample: f32) -> u8 {
    (sample * 128.0 + 128.0).clamp(0.0, 255.0) as u8
}

/// Read tap on the audio output: a fixed ring of unsigned time-domain
/// samples the stream callback writes into. Shared and reused across
/// tone sessions.
pub struct ScopeFeed {
    buffer: Vec<u8>,
    cursor: usize,
}

impl ScopeFeed {
    pub fn new() -> Self {
        Self {
            buffer: vec![SILENCE; SCOPE_WINDOW],
            cursor: 0,
        }
    }

    pub fn push(&mut self, value: u8) {
        if let Some(slot) = self.buffer.get_mut(self.cursor) {
            *slot = value;
        }
        self.cursor = (self.cursor + 1) % self.buffer.len();
    }

    /// Current window, oldest sample first.
    pub fn snapshot(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.buffer.len());
        data.extend_from_slice(&self.buffer[self.cursor..]);
        data.extend_from_slice(&self.buffer[..self.cursor]);
        data
    }
}

pub type FeedHandle = Arc<Mutex<ScopeFeed>>;

/// Repeating draw cycle for the oscilloscope. The cycle reschedules
/// itself after each fire using the interval configured at that moment,
/// so at most one cycle is in flight and interval changes take effect
/// within one cycle. `poll` returning `Some` is one draw cycle; a fired
/// cycle with no feed attached skips drawing but keeps the cadence.
pub struct ScopeRenderer {
    feed: Option<FeedHandle>,
    running: bool,
    interval_ms: u32,
    next_deadline: f64,
}

impl ScopeRenderer {
    pub fn new() -> Self {
        Self {
            feed: None,
            running: false,
            interval_ms: DEFAULT_INTERVAL_MS,
            next_deadline: 0.0,
        }
    }

    pub fn attach(&mut self, feed: FeedHandle) {
        self.feed = Some(feed);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Applied at the next reschedule, not to the cycle already pending.
    pub fn set_interval_ms(&mut self, ms: u32) {
        self.interval_ms = ms.max(1);
    }

    /// Idempotent; starting a running renderer keeps its pending deadline.
    pub fn start(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.next_deadline = now;
    }

    /// Halts the cycle. The last-drawn trace is the caller's to keep.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn poll(&mut self, now: f64) -> Option<Vec<u8>> {
        if !self.running || now < self.next_deadline {
            return None;
        }
        self.next_deadline = now + f64::from(self.interval_ms) / 1000.0;
        let feed = self.feed.as_ref()?;
        let guard = feed.lock().expect("lock scope feed");
        Some(guard.snapshot())
    }
}

/// Maps one sample window onto a polyline spanning the full surface.
/// Byte 128 (silence) lands on the centerline; the trailing point
/// re-anchors the trace at (width, height/2).
pub fn trace_points(samples: &[u8], width: f32, height: f32) -> Vec<(f32, f32)> {
    if samples.is_empty() {
        return Vec::new();
    }
    let slice_width = width / samples.len() as f32;
    let mut points = Vec::with_capacity(samples.len() + 1);
    for (index, byte) in samples.iter().enumerate() {
        let amplitude = f32::from(*byte) / 128.0;
        let y = amplitude * height / 2.0;
        points.push((index as f32 * slice_width, y));
    }
    points.push((width, height / 2.0));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached_renderer() -> ScopeRenderer {
        let mut renderer = ScopeRenderer::new();
        renderer.attach(Arc::new(Mutex::new(ScopeFeed::new())));
        renderer
    }

    #[test]
    fn feed_snapshot_is_oldest_first() {
        let mut feed = ScopeFeed::new();
        for byte in [10u8, 20, 30] {
            feed.push(byte);
        }
        let snapshot = feed.snapshot();
        assert_eq!(snapshot.len(), SCOPE_WINDOW);
        assert_eq!(&snapshot[SCOPE_WINDOW - 3..], &[10, 20, 30]);
        assert!(snapshot[..SCOPE_WINDOW - 3].iter().all(|b| *b == SILENCE));
    }

    #[test]
    fn byte_encoding_centers_silence() {
        assert_eq!(sample_to_byte(0.0), 128);
        assert_eq!(sample_to_byte(-1.0), 0);
        assert_eq!(sample_to_byte(1.0), 255);
        assert_eq!(sample_to_byte(7.0), 255);
    }

    #[test]
    fn start_is_idempotent() {
        let mut renderer = attached_renderer();
        renderer.start(0.0);
        assert!(renderer.poll(0.0).is_some());
        // a redundant start must not reset the pending deadline
        renderer.start(0.01);
        assert!(renderer.poll(0.02).is_none());
        assert!(renderer.poll(0.031).is_some());
    }

    #[test]
    fn cycle_fires_on_the_configured_cadence() {
        let mut renderer = attached_renderer();
        renderer.start(0.0);
        assert!(renderer.poll(0.0).is_some());
        assert!(renderer.poll(0.029).is_none());
        assert!(renderer.poll(0.031).is_some());
    }

    #[test]
    fn interval_change_applies_to_the_next_reschedule() {
        let mut renderer = attached_renderer();
        renderer.start(0.0);
        assert!(renderer.poll(0.0).is_some());
        renderer.set_interval_ms(10);
        // pending cycle still honors the old 30 ms deadline
        assert!(renderer.poll(0.010).is_none());
        assert!(renderer.poll(0.031).is_some());
        // from here on the loop runs at 10 ms
        assert!(renderer.poll(0.035).is_none());
        assert!(renderer.poll(0.042).is_some());
    }

    #[test]
    fn stop_is_observed_before_the_next_cycle() {
        let mut renderer = attached_renderer();
        renderer.start(0.0);
        assert!(renderer.poll(0.0).is_some());
        renderer.stop();
        assert!(!renderer.is_running());
        assert!(renderer.poll(1.0).is_none());
    }

    #[test]
    fn missing_feed_skips_the_draw_but_keeps_the_cadence() {
        let mut renderer = ScopeRenderer::new();
        renderer.start(0.0);
        assert!(renderer.poll(0.0).is_none());
        renderer.attach(Arc::new(Mutex::new(ScopeFeed::new())));
        // the skipped cycle still rescheduled
        assert!(renderer.poll(0.001).is_none());
        assert!(renderer.poll(0.031).is_some());
    }

    #[test]
    fn trace_spans_width_and_anchors_the_tail() {
        let samples = [0u8, 128, 255, 128];
        let points = trace_points(&samples, 400.0, 200.0);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(points[1], (100.0, 100.0));
        assert_eq!(points[2].1, 255.0 / 128.0 * 100.0);
        assert_eq!(points[4], (400.0, 100.0));
    }

    #[test]
    fn empty_window_draws_nothing() {
        assert!(trace_points(&[], 400.0, 200.0).is_empty());
    }
}
