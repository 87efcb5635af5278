/// Single amplitude node every active voice mixes through. Level changes
/// are direct value sets; abrupt jumps are expected, not smoothed.
#[derive(Debug)]
pub struct GainStage {
    level: f32,
}

impl GainStage {
    pub fn new(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn set_level(&mut self, value: f32) {
        self.level = value.clamp(0.0, 1.0);
    }

    pub fn apply(&self, sample: f32) -> f32 {
        sample * self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_applied_exactly() {
        let mut gain = GainStage::new(0.5);
        assert_eq!(gain.apply(1.0), 0.5);
        gain.set_level(0.25);
        assert_eq!(gain.level(), 0.25);
        assert_eq!(gain.apply(-0.8), -0.2);
    }

    #[test]
    fn level_is_clamped() {
        let mut gain = GainStage::new(1.8);
        assert_eq!(gain.level(), 1.0);
        gain.set_level(-0.3);
        assert_eq!(gain.level(), 0.0);
    }
}
