/// Sound presets
///
/// An authored, named configuration describing how to play one logical sound
/// effect: its shape (one clip or a collection), its volume policy, and, for
/// collections, how the collection is realized at play time.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clip::Clip;

/// How a multi-clip preset realizes a play request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMode {
    /// Pick one clip uniformly at random
    RandomPick,

    /// Fire every clip in list order, overlapping
    PlayAll,
}

/// Volume policy: a fixed level, or a range sampled per clip played
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VolumePolicy {
    Fixed(f32),
    Range { min: f32, max: f32 },
}

impl VolumePolicy {
    /// Fixed volume, clamped to 0.0-1.0
    pub fn fixed(level: f32) -> Self {
        VolumePolicy::Fixed(level.clamp(0.0, 1.0))
    }

    /// Randomized volume range, clamped to 0.0-1.0 and reordered if reversed
    pub fn range(min: f32, max: f32) -> Self {
        let min = min.clamp(0.0, 1.0);
        let max = max.clamp(0.0, 1.0);
        if min <= max {
            VolumePolicy::Range { min, max }
        } else {
            VolumePolicy::Range { min: max, max: min }
        }
    }

    /// Resolve the volume for one clip. Ranges draw a fresh sample per call.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            VolumePolicy::Fixed(level) => level.clamp(0.0, 1.0),
            VolumePolicy::Range { min, max } => {
                let lo = min.min(max).clamp(0.0, 1.0);
                let hi = min.max(max).clamp(0.0, 1.0);
                rng.gen_range(lo..=hi)
            }
        }
    }

    pub fn is_randomized(&self) -> bool {
        matches!(self, VolumePolicy::Range { .. })
    }
}

impl Default for VolumePolicy {
    fn default() -> Self {
        VolumePolicy::Fixed(1.0)
    }
}

/// Preset shape: one fixed clip, or a collection with a realization mode
#[derive(Debug, Clone, PartialEq)]
pub enum SoundShape {
    Single(Clip),
    Multi { mode: MultiMode, clips: Vec<Clip> },
}

/// A named, immutable sound preset
#[derive(Debug, Clone, PartialEq)]
pub struct SoundPreset {
    name: String,
    shape: SoundShape,
    volume: VolumePolicy,
}

impl SoundPreset {
    /// Preset with a single fixed clip, full volume
    pub fn single(name: impl Into<String>, clip: Clip) -> Self {
        Self {
            name: name.into(),
            shape: SoundShape::Single(clip),
            volume: VolumePolicy::default(),
        }
    }

    /// Preset with a clip collection and a realization mode, full volume
    pub fn multi(name: impl Into<String>, mode: MultiMode, clips: Vec<Clip>) -> Self {
        Self {
            name: name.into(),
            shape: SoundShape::Multi { mode, clips },
            volume: VolumePolicy::default(),
        }
    }

    pub fn with_volume(mut self, volume: VolumePolicy) -> Self {
        self.volume = volume;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &SoundShape {
        &self.shape
    }

    pub fn volume(&self) -> VolumePolicy {
        self.volume
    }

    /// One clip chosen uniformly at random from the collection.
    ///
    /// Returns `None` for single-clip presets and for collections with no
    /// clips; callers treat both as "nothing to play".
    pub fn pick_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Clip> {
        match &self.shape {
            SoundShape::Multi { clips, .. } if !clips.is_empty() => {
                clips.get(rng.gen_range(0..clips.len()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clip(label: &str) -> Clip {
        Clip::from_bytes(label, vec![0u8; 4])
    }

    #[test]
    fn test_fixed_volume_clamping() {
        assert_eq!(VolumePolicy::fixed(1.5), VolumePolicy::Fixed(1.0));
        assert_eq!(VolumePolicy::fixed(-0.5), VolumePolicy::Fixed(0.0));
    }

    #[test]
    fn test_range_reordered_when_reversed() {
        let policy = VolumePolicy::range(0.9, 0.2);
        assert_eq!(policy, VolumePolicy::Range { min: 0.2, max: 0.9 });
    }

    #[test]
    fn test_fixed_sample_is_exact() {
        let mut rng = StdRng::seed_from_u64(7);
        let policy = VolumePolicy::fixed(0.8);
        for _ in 0..10 {
            assert_eq!(policy.sample(&mut rng), 0.8);
        }
    }

    #[test]
    fn test_range_sample_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let policy = VolumePolicy::range(0.4, 0.6);
        for _ in 0..200 {
            let v = policy.sample(&mut rng);
            assert!((0.4..=0.6).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn test_degenerate_range_sample() {
        let mut rng = StdRng::seed_from_u64(7);
        let policy = VolumePolicy::range(0.5, 0.5);
        assert_eq!(policy.sample(&mut rng), 0.5);
    }

    #[test]
    fn test_pick_one_returns_member() {
        let clips = vec![clip("a"), clip("b"), clip("c")];
        let preset = SoundPreset::multi("step", MultiMode::RandomPick, clips.clone());

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = preset.pick_one(&mut rng).expect("collection is non-empty");
            assert!(clips.contains(picked));
        }
    }

    #[test]
    fn test_pick_one_on_empty_collection() {
        let preset = SoundPreset::multi("step", MultiMode::RandomPick, Vec::new());
        let mut rng = StdRng::seed_from_u64(7);
        assert!(preset.pick_one(&mut rng).is_none());
    }

    #[test]
    fn test_pick_one_on_single_preset() {
        let preset = SoundPreset::single("hit", clip("hit"));
        let mut rng = StdRng::seed_from_u64(7);
        assert!(preset.pick_one(&mut rng).is_none());
    }

    #[test]
    fn test_multi_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&MultiMode::RandomPick).unwrap(),
            "\"random_pick\""
        );
        assert_eq!(
            serde_json::to_string(&MultiMode::PlayAll).unwrap(),
            "\"play_all\""
        );
    }

    #[test]
    fn test_volume_policy_serialization() {
        let fixed: VolumePolicy = serde_json::from_str("0.8").unwrap();
        assert_eq!(fixed, VolumePolicy::Fixed(0.8));

        let range: VolumePolicy = serde_json::from_str("{\"min\":0.4,\"max\":0.9}").unwrap();
        assert_eq!(range, VolumePolicy::Range { min: 0.4, max: 0.9 });
    }
}
