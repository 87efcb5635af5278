#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub const VALUES: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Waveform::Sine => "SINE",
            Waveform::Square => "SQUARE",
            Waveform::Sawtooth => "SAW",
            Waveform::Triangle => "TRI",
        }
    }

    pub fn sample(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (phase - 0.5),
            Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
        }
    }
}

/// A running tone generator bound to one frequency and waveform.
/// The waveform is fixed for the voice's lifetime; frequency can be
/// retuned while the voice plays.
#[derive(Debug)]
pub struct ToneVoice {
    frequency: f32,
    waveform: Waveform,
    phase: f32,
}

impl ToneVoice {
    pub fn new(frequency: f32, waveform: Waveform) -> Self {
        Self {
            frequency,
            waveform,
            phase: 0.0,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn set_frequency(&mut self, hz: f32) {
        self.frequency = hz;
    }

    pub fn sample(&mut self, sample_rate: f32) -> f32 {
        let phase_delta = self.frequency / sample_rate.max(1.0);
        self.phase = (self.phase + phase_delta).fract();
        self.waveform.sample(self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveforms_stay_in_range() {
        for waveform in Waveform::VALUES {
            let mut voice = ToneVoice::new(440.0, waveform);
            for _ in 0..44_100 {
                let s = voice.sample(44_100.0);
                assert!(
                    (-1.0..=1.0).contains(&s),
                    "{} out of range: {s}",
                    waveform.label()
                );
            }
        }
    }

    #[test]
    fn square_holds_both_levels() {
        let mut voice = ToneVoice::new(100.0, Waveform::Square);
        let mut high = 0;
        let mut low = 0;
        for _ in 0..4410 {
            if voice.sample(44_100.0) > 0.0 {
                high += 1;
            } else {
                low += 1;
            }
        }
        // ten full cycles, half the samples on each side
        assert!(high > 2000 && low > 2000);
    }

    #[test]
    fn retune_changes_phase_rate() {
        let mut voice = ToneVoice::new(440.0, Waveform::Sine);
        voice.set_frequency(880.0);
        assert_eq!(voice.frequency(), 880.0);
        // one sample at 880 Hz advances phase twice as far as at 440 Hz
        let s = voice.sample(44_100.0);
        let expected = (880.0 / 44_100.0 * std::f32::consts::TAU).sin();
        assert!((s - expected).abs() < 1e-6);
    }
}
