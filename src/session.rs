use std::fmt;
use std::sync::{Arc, Mutex, mpsc};

use tokio::runtime::Runtime;

use crate::gain::GainStage;
use crate::voice::{ToneVoice, Waveform};

pub const FREQ_MIN_HZ: f32 = 20.0;
pub const FREQ_MAX_HZ: f32 = 20_000.0;
pub const BEAT_OFFSET_MIN_HZ: f32 = 0.0;
pub const BEAT_OFFSET_MAX_HZ: f32 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneMode {
    Stopped,
    SingleTone,
    BeatTones,
}

#[derive(Debug, PartialEq)]
pub enum ToneError {
    FrequencyOutOfRange(f32),
    BeatOffsetOutOfRange(f32),
    ToneActive,
}

impl fmt::Display for ToneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneError::FrequencyOutOfRange(_) => {
                write!(f, "Frequency must be between 20 and 20,000 Hz.")
            }
            ToneError::BeatOffsetOutOfRange(_) => {
                write!(f, "Beat frequency difference must be between 0 and 15 Hz.")
            }
            ToneError::ToneActive => write!(f, "Stop the current tone first."),
        }
    }
}

impl std::error::Error for ToneError {}

/// The active sound-producing configuration: mode state machine, the
/// voices it owns, and the gain stage they mix through. Also the surface
/// the audio callback pulls samples from, so it lives behind a mutex
/// shared between the UI thread and the stream thread.
pub struct ToneSession {
    mode: ToneMode,
    base_frequency: f32,
    beat_offset: f32,
    waveform: Waveform,
    volume: f32,
    voices: Vec<ToneVoice>,
    gain: Option<GainStage>,
    sample_rate: f32,
}

impl ToneSession {
    pub fn new() -> Self {
        Self {
            mode: ToneMode::Stopped,
            base_frequency: 440.0,
            beat_offset: 0.0,
            waveform: Waveform::Sine,
            volume: 0.5,
            voices: Vec::new(),
            gain: None,
            sample_rate: 44_100.0,
        }
    }

    pub fn mode(&self) -> ToneMode {
        self.mode
    }

    pub fn base_frequency(&self) -> f32 {
        self.base_frequency
    }

    pub fn beat_offset(&self) -> f32 {
        self.beat_offset
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn gain_level(&self) -> Option<f32> {
        self.gain.as_ref().map(GainStage::level)
    }

    pub fn voice_frequencies(&self) -> Vec<f32> {
        self.voices.iter().map(ToneVoice::frequency).collect()
    }

    pub fn voice_waveforms(&self) -> Vec<Waveform> {
        self.voices.iter().map(ToneVoice::waveform).collect()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, rate: f32) {
        self.sample_rate = rate.max(1.0);
    }

    /// Start one voice at the current frequency/waveform/volume. Fails
    /// if any tone is already playing; validation precedes every graph
    /// mutation, so a failed start changes nothing.
    pub fn start_single_tone(&mut self) -> Result<(), ToneError> {
        if self.mode != ToneMode::Stopped {
            return Err(ToneError::ToneActive);
        }
        self.gain = Some(GainStage::new(self.volume));
        self.voices
            .push(ToneVoice::new(self.base_frequency, self.waveform));
        self.mode = ToneMode::SingleTone;
        Ok(())
    }

    /// Idempotent: a second stop, or a stop while beats play, is a no-op.
    pub fn stop_single_tone(&mut self) {
        if self.mode == ToneMode::SingleTone {
            self.teardown();
        }
    }

    /// Start two voices at `base` and `base + offset_hz`, same waveform.
    /// An offset outside [0, 15] Hz aborts with no state change.
    pub fn start_beat_tones(&mut self, offset_hz: f32) -> Result<(), ToneError> {
        if self.mode != ToneMode::Stopped {
            return Err(ToneError::ToneActive);
        }
        if !(BEAT_OFFSET_MIN_HZ..=BEAT_OFFSET_MAX_HZ).contains(&offset_hz) {
            return Err(ToneError::BeatOffsetOutOfRange(offset_hz));
        }
        self.beat_offset = offset_hz;
        self.gain = Some(GainStage::new(self.volume));
        self.voices
            .push(ToneVoice::new(self.base_frequency, self.waveform));
        self.voices.push(ToneVoice::new(
            self.base_frequency + offset_hz,
            self.waveform,
        ));
        self.mode = ToneMode::BeatTones;
        Ok(())
    }

    pub fn stop_beat_tones(&mut self) {
        if self.mode == ToneMode::BeatTones {
            self.teardown();
        }
    }

    /// Clamp into [20, 20000] Hz, store, and retune any live voices. An
    /// out-of-range input still applies the clamped value but reports the
    /// violation to the caller.
    pub fn set_frequency(&mut self, hz: f32) -> Result<(), ToneError> {
        let clamped = hz.clamp(FREQ_MIN_HZ, FREQ_MAX_HZ);
        self.base_frequency = clamped;
        self.retune();
        if clamped == hz {
            Ok(())
        } else {
            Err(ToneError::FrequencyOutOfRange(hz))
        }
    }

    /// Preset values are pre-vetted literals; no validation.
    pub fn apply_preset(&mut self, hz: f32) {
        self.base_frequency = hz;
        self.retune();
    }

    /// Direct level set, applied to the live gain stage immediately.
    pub fn set_volume(&mut self, value: f32) {
        self.volume = value.clamp(0.0, 1.0);
        if let Some(gain) = &mut self.gain {
            gain.set_level(self.volume);
        }
    }

    /// Stored for the next start; a running voice keeps its shape.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// The configured offset used by live retunes. Range-checked only when
    /// beats are started.
    pub fn set_beat_offset(&mut self, hz: f32) {
        self.beat_offset = hz;
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.voices.is_empty() {
            return 0.0;
        }
        let sample_rate = self.sample_rate;
        let mixed: f32 = self
            .voices
            .iter_mut()
            .map(|voice| voice.sample(sample_rate))
            .sum();
        match &self.gain {
            Some(gain) => gain.apply(mixed),
            None => 0.0,
        }
    }

    fn retune(&mut self) {
        if let Some(primary) = self.voices.get_mut(0) {
            primary.set_frequency(self.base_frequency);
        }
        if let Some(secondary) = self.voices.get_mut(1) {
            secondary.set_frequency(self.base_frequency + self.beat_offset);
        }
    }

    fn teardown(&mut self) {
        self.voices.clear();
        self.gain = None;
        self.mode = ToneMode::Stopped;
    }
}

/// Parameter updates that carry no error path: values are pre-vetted or
/// clamped on arrival, so they can be applied off the UI handler.
#[derive(Debug)]
pub enum SessionCommand {
    SetVolume(f32),
    SetWaveform(Waveform),
    SetBeatOffset(f32),
    ApplyPreset(f32),
}

pub type SharedSession = Arc<Mutex<ToneSession>>;
pub type SessionHandle = (SharedSession, mpsc::Sender<SessionCommand>);

pub fn spawn_session(runtime: &Runtime) -> SessionHandle {
    let (tx, rx) = mpsc::channel();
    let session = Arc::new(Mutex::new(ToneSession::new()));
    let thread_session = session.clone();

    runtime.spawn_blocking(move || {
        while let Ok(cmd) = rx.recv() {
            let mut guard = thread_session.lock().expect("lock tone session");
            match cmd {
                SessionCommand::SetVolume(value) => guard.set_volume(value),
                SessionCommand::SetWaveform(waveform) => guard.set_waveform(waveform),
                SessionCommand::SetBeatOffset(hz) => guard.set_beat_offset(hz),
                SessionCommand::ApplyPreset(hz) => guard.apply_preset(hz),
            }
        }
    });

    (session, tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tone_lifecycle() {
        let mut session = ToneSession::new();
        session.set_frequency(440.0).unwrap();
        session.set_waveform(Waveform::Sine);
        session.set_volume(0.5);

        session.start_single_tone().unwrap();
        assert_eq!(session.mode(), ToneMode::SingleTone);
        assert_eq!(session.voice_frequencies(), vec![440.0]);
        assert_eq!(session.gain_level(), Some(0.5));

        session.stop_single_tone();
        assert_eq!(session.mode(), ToneMode::Stopped);
        assert!(session.voice_frequencies().is_empty());
        assert_eq!(session.gain_level(), None);
    }

    #[test]
    fn stop_twice_is_a_noop() {
        let mut session = ToneSession::new();
        session.start_single_tone().unwrap();
        session.stop_single_tone();
        session.stop_single_tone();
        assert_eq!(session.mode(), ToneMode::Stopped);
        session.stop_beat_tones();
        assert_eq!(session.mode(), ToneMode::Stopped);
    }

    #[test]
    fn in_range_frequency_reaches_live_voice_exactly() {
        let mut session = ToneSession::new();
        session.start_single_tone().unwrap();
        for hz in [20.0, 123.4, 440.0, 20_000.0] {
            session.set_frequency(hz).unwrap();
            assert_eq!(session.voice_frequencies(), vec![hz]);
        }
    }

    #[test]
    fn out_of_range_frequency_clamps_and_reports() {
        let mut session = ToneSession::new();
        let err = session.set_frequency(5.0).unwrap_err();
        assert_eq!(err, ToneError::FrequencyOutOfRange(5.0));
        assert_eq!(session.base_frequency(), 20.0);

        let err = session.set_frequency(30_000.0).unwrap_err();
        assert_eq!(err, ToneError::FrequencyOutOfRange(30_000.0));
        assert_eq!(session.base_frequency(), 20_000.0);
    }

    #[test]
    fn beat_tones_start_at_base_and_offset() {
        let mut session = ToneSession::new();
        session.apply_preset(300.0);
        session.start_beat_tones(10.0).unwrap();
        assert_eq!(session.mode(), ToneMode::BeatTones);
        assert_eq!(session.voice_frequencies(), vec![300.0, 310.0]);
    }

    #[test]
    fn beat_retune_tracks_base_plus_offset() {
        let mut session = ToneSession::new();
        session.apply_preset(300.0);
        session.start_beat_tones(10.0).unwrap();
        session.set_frequency(500.0).unwrap();
        assert_eq!(session.voice_frequencies(), vec![500.0, 510.0]);
    }

    #[test]
    fn beat_offset_out_of_range_aborts_start() {
        let mut session = ToneSession::new();
        let err = session.start_beat_tones(20.0).unwrap_err();
        assert_eq!(err, ToneError::BeatOffsetOutOfRange(20.0));
        assert_eq!(session.mode(), ToneMode::Stopped);
        assert!(session.voice_frequencies().is_empty());
        assert_eq!(session.gain_level(), None);

        let err = session.start_beat_tones(-1.0).unwrap_err();
        assert_eq!(err, ToneError::BeatOffsetOutOfRange(-1.0));
        assert_eq!(session.mode(), ToneMode::Stopped);
    }

    #[test]
    fn offset_boundaries_are_accepted() {
        let mut session = ToneSession::new();
        session.start_beat_tones(0.0).unwrap();
        session.stop_beat_tones();
        session.start_beat_tones(15.0).unwrap();
        assert_eq!(session.mode(), ToneMode::BeatTones);
    }

    #[test]
    fn second_start_is_rejected_while_active() {
        let mut session = ToneSession::new();
        session.start_single_tone().unwrap();
        assert_eq!(session.start_beat_tones(5.0).unwrap_err(), ToneError::ToneActive);
        assert_eq!(session.start_single_tone().unwrap_err(), ToneError::ToneActive);
        // the failed starts changed nothing
        assert_eq!(session.mode(), ToneMode::SingleTone);
        assert_eq!(session.voice_frequencies().len(), 1);
    }

    #[test]
    fn volume_propagates_to_live_gain_exactly() {
        let mut session = ToneSession::new();
        session.start_single_tone().unwrap();
        session.set_volume(0.73);
        assert_eq!(session.gain_level(), Some(0.73));
        session.set_volume(1.5);
        assert_eq!(session.gain_level(), Some(1.0));
    }

    #[test]
    fn waveform_change_waits_for_next_start() {
        let mut session = ToneSession::new();
        session.set_waveform(Waveform::Sine);
        session.start_single_tone().unwrap();
        session.set_waveform(Waveform::Square);
        assert_eq!(session.waveform(), Waveform::Square);
        // running voice keeps the shape it started with
        assert_eq!(session.voice_waveforms(), vec![Waveform::Sine]);
        session.stop_single_tone();
        session.start_single_tone().unwrap();
        // new voice picks up the stored waveform
        assert_eq!(session.voice_waveforms(), vec![Waveform::Square]);
    }

    #[test]
    fn stopped_session_is_silent() {
        let mut session = ToneSession::new();
        for _ in 0..64 {
            assert_eq!(session.next_sample(), 0.0);
        }
    }

    #[test]
    fn preset_applies_live_without_validation() {
        let mut session = ToneSession::new();
        session.start_single_tone().unwrap();
        session.apply_preset(1000.0);
        assert_eq!(session.voice_frequencies(), vec![1000.0]);
    }
}
