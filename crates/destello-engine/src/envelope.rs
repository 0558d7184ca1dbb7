//! Attack/release amplitude envelope.
//!
//! A deliberately minimal two-stage envelope: a linear ramp to full level
//! while the note is held, an exponential decay once it is released. The
//! stage change is driven only by the note-off event — reaching full level
//! does not leave the attack stage.

use libm::expf;

/// Envelope stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Ramping linearly toward full level while the note is held.
    #[default]
    Attack,
    /// Decaying exponentially toward silence after note-off.
    Release,
}

/// Level at which a releasing envelope snaps to zero.
///
/// Bounds the release tail and keeps the recursive decay out of denormal
/// range.
pub const RELEASE_FLOOR: f32 = 0.001;

const DEFAULT_ATTACK_SECS: f32 = 0.1;
const DEFAULT_RELEASE_SECS: f32 = 0.5;

/// Two-stage amplitude envelope.
///
/// # Example
///
/// ```rust
/// use destello_engine::{Envelope, EnvelopeStage};
///
/// let mut env = Envelope::new(48000.0);
/// env.trigger();
/// for _ in 0..100 {
///     env.advance();
/// }
/// env.release();
/// assert_eq!(env.stage(), EnvelopeStage::Release);
/// ```
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Current stage
    stage: EnvelopeStage,
    /// Current output level, 0.0 to 1.0
    level: f32,
    /// Sample rate
    sample_rate: f32,

    // Time parameters (in seconds)
    attack_secs: f32,
    release_secs: f32,

    // Coefficients (pre-calculated)
    attack_rate: f32,
    release_coeff: f32,

    /// Set once the release decay crosses [`RELEASE_FLOOR`]
    finished: bool,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Envelope {
    /// Create a new envelope with default times (100 ms attack, 500 ms
    /// release).
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            stage: EnvelopeStage::Attack,
            level: 0.0,
            sample_rate,
            attack_secs: DEFAULT_ATTACK_SECS,
            release_secs: DEFAULT_RELEASE_SECS,
            attack_rate: 0.0,
            release_coeff: 0.0,
            finished: false,
        };
        env.recalculate_coefficients();
        env
    }

    /// Set attack time in seconds.
    pub fn set_attack_secs(&mut self, secs: f32) {
        self.attack_secs = secs.max(1e-4);
        self.recalculate_attack_rate();
    }

    /// Get attack time in seconds.
    pub fn attack_secs(&self) -> f32 {
        self.attack_secs
    }

    /// Set release time in seconds.
    pub fn set_release_secs(&mut self, secs: f32) {
        self.release_secs = secs.max(1e-4);
        self.recalculate_release_coeff();
    }

    /// Get release time in seconds.
    pub fn release_secs(&self) -> f32 {
        self.release_secs
    }

    /// Set sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Start the envelope at zero level in the attack stage (note on).
    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.level = 0.0;
        self.finished = false;
    }

    /// Enter the release stage (note off). Level is unchanged at that
    /// instant — there is no separate sustain level.
    pub fn release(&mut self) {
        self.stage = EnvelopeStage::Release;
    }

    /// Force the envelope back to its initial silent state.
    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.level = 0.0;
        self.finished = false;
    }

    /// Get current stage.
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Get current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// True once the release decay has crossed the floor and snapped to
    /// zero. Terminal — the owning voice frees its slot.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the envelope by one sample and return the new level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Attack => {
                // Linear ramp; stays in attack until release() is called,
                // even at full level.
                self.level += self.attack_rate;
                if self.level > 1.0 {
                    self.level = 1.0;
                }
            }
            EnvelopeStage::Release => {
                self.level *= self.release_coeff;
                if self.level <= RELEASE_FLOOR {
                    self.level = 0.0;
                    self.finished = true;
                }
            }
        }
        self.level
    }

    fn recalculate_coefficients(&mut self) {
        self.recalculate_attack_rate();
        self.recalculate_release_coeff();
    }

    fn recalculate_attack_rate(&mut self) {
        self.attack_rate = 1.0 / (self.attack_secs * self.sample_rate).max(1.0);
    }

    fn recalculate_release_coeff(&mut self) {
        // Time constant chosen so the level falls to ~1% (e^-5) of its
        // note-off value in release_secs.
        self.release_coeff = expf(-5.0 / (self.release_secs * self.sample_rate).max(1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_slope_is_linear() {
        let mut env = Envelope::new(48000.0);
        env.set_attack_secs(0.1);
        env.trigger();

        let step = 1.0 / (0.1 * 48000.0);
        for n in 1..=100 {
            let level = env.advance();
            assert!(
                (level - n as f32 * step).abs() < 1e-5,
                "sample {n}: expected {} got {level}",
                n as f32 * step
            );
        }
    }

    #[test]
    fn test_attack_clamps_at_full_level() {
        let mut env = Envelope::new(48000.0);
        env.set_attack_secs(0.001); // 48 samples to full
        env.trigger();

        for _ in 0..200 {
            let level = env.advance();
            assert!(level <= 1.0);
        }
        assert_eq!(env.level(), 1.0);
        // Reaching full level does not leave the attack stage
        assert_eq!(env.stage(), EnvelopeStage::Attack);
    }

    #[test]
    fn test_release_follows_exponential_law() {
        let sample_rate = 48000.0;
        let release_secs = 0.2;
        let mut env = Envelope::new(sample_rate);
        env.set_attack_secs(0.001);
        env.set_release_secs(release_secs);
        env.trigger();
        for _ in 0..100 {
            env.advance();
        }

        env.release();
        let start = env.level();
        let coeff = libm::expf(-5.0 / (release_secs * sample_rate));

        let mut expected = start;
        for n in 0..500 {
            expected *= coeff;
            let level = env.advance();
            assert!(
                (level - expected).abs() < 1e-5,
                "sample {n}: expected {expected} got {level}"
            );
        }
    }

    #[test]
    fn test_release_is_monotone_and_terminates() {
        let mut env = Envelope::new(48000.0);
        env.set_attack_secs(0.001);
        env.set_release_secs(0.05);
        env.trigger();
        for _ in 0..100 {
            env.advance();
        }

        env.release();
        let mut prev = env.level();
        // 0.05 s release at 48kHz: well under 48000 samples to the floor
        for _ in 0..48000 {
            let level = env.advance();
            assert!(level <= prev, "release must be non-increasing");
            prev = level;
            if env.is_finished() {
                break;
            }
        }
        assert!(env.is_finished());
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn test_release_level_continuous_at_note_off() {
        let mut env = Envelope::new(48000.0);
        env.trigger();
        for _ in 0..500 {
            env.advance();
        }
        let before = env.level();
        env.release();
        // No level jump at the stage change itself
        assert_eq!(env.level(), before);
    }

    #[test]
    fn test_trigger_restarts_from_zero() {
        let mut env = Envelope::new(48000.0);
        env.trigger();
        for _ in 0..1000 {
            env.advance();
        }
        assert!(env.level() > 0.0);

        env.trigger();
        assert_eq!(env.level(), 0.0);
        assert_eq!(env.stage(), EnvelopeStage::Attack);
        assert!(!env.is_finished());
    }
}
