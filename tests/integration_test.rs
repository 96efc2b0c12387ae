// Integration tests for soundbank
// These exercise the preset directory scan and manager dispatch end to end.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use soundbank::{
    AudioOutput, Clip, DirectoryRegistry, MultiMode, OutputError, PresetRegistry, SoundManager,
    SoundManagerConfig, SoundPreset, SoundShape, StaticRegistry, VolumePolicy,
};

/// Recording audio output shared between the test and the manager
#[derive(Clone, Default)]
struct Recorder {
    one_shots: Arc<Mutex<Vec<(String, f32)>>>,
    music: Arc<Mutex<Vec<(String, bool)>>>,
}

struct MockOutput {
    recorder: Recorder,
}

impl MockOutput {
    fn new() -> (Self, Recorder) {
        let recorder = Recorder::default();
        (
            Self {
                recorder: recorder.clone(),
            },
            recorder,
        )
    }
}

impl AudioOutput for MockOutput {
    fn play_one_shot(&mut self, clip: &Clip, volume: f32) -> Result<(), OutputError> {
        self.recorder
            .one_shots
            .lock()
            .push((clip.label().to_string(), volume));
        Ok(())
    }

    fn play_looping(&mut self, clip: &Clip, looping: bool) -> Result<(), OutputError> {
        self.recorder
            .music
            .lock()
            .push((clip.label().to_string(), looping));
        Ok(())
    }

    fn stop(&mut self) {}

    fn pause(&mut self) {}

    fn unpause(&mut self) {}

    fn is_playing(&self) -> bool {
        false
    }

    fn set_muted(&mut self, _muted: bool) {}
}

/// Fresh scratch directory under the system temp dir
fn temp_preset_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("soundbank_test_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(dir: &PathBuf, name: &str, content: &[u8]) {
    fs::write(dir.join(name), content).unwrap();
}

fn manager_with_mock(
    presets: Vec<SoundPreset>,
) -> (SoundManager<MockOutput>, Recorder) {
    let (output, recorder) = MockOutput::new();
    let mut manager = SoundManager::with_rng(
        output,
        SoundManagerConfig::default(),
        StdRng::seed_from_u64(42),
    );
    manager
        .initialize(&StaticRegistry::with_presets(presets))
        .unwrap();
    (manager, recorder)
}

#[test]
fn test_directory_scan_builds_ordered_registry() {
    let dir = temp_preset_dir("scan");
    write_file(&dir, "hit.wav", b"fake wav data");
    write_file(&dir, "s1.wav", b"fake wav data");
    write_file(&dir, "s2.wav", b"fake wav data");

    write_file(
        &dir,
        "a_hit.json",
        br#"{"name": "hit", "volume": 0.8, "single": {"clip": "hit.wav"}}"#,
    );
    write_file(
        &dir,
        "b_step.json",
        br#"{"name": "step", "multi": {"mode": "play_all", "clips": ["s1.wav", "s2.wav"]}}"#,
    );

    let registry = DirectoryRegistry::new(&dir);
    let presets = registry.find_all_presets().unwrap();

    // File-name order, not discovery order
    assert_eq!(presets.len(), 2);
    assert_eq!(presets[0].name(), "hit");
    assert_eq!(presets[1].name(), "step");

    assert_eq!(presets[0].volume(), VolumePolicy::Fixed(0.8));
    match presets[1].shape() {
        SoundShape::Multi { mode, clips } => {
            assert_eq!(*mode, MultiMode::PlayAll);
            let labels: Vec<&str> = clips.iter().map(|c| c.label()).collect();
            assert_eq!(labels, vec!["s1", "s2"]);
        }
        SoundShape::Single(_) => panic!("expected multi shape"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_directory_scan_skips_broken_files() {
    let dir = temp_preset_dir("broken");
    write_file(&dir, "hit.wav", b"fake wav data");

    write_file(
        &dir,
        "good.json",
        br#"{"name": "hit", "single": {"clip": "hit.wav"}}"#,
    );
    write_file(&dir, "garbage.json", b"{ not json");
    write_file(
        &dir,
        "missing_clip.json",
        br#"{"name": "lost", "single": {"clip": "nope.wav"}}"#,
    );
    write_file(
        &dir,
        "bad_volume.json",
        br#"{"name": "loud", "volume": 2.0, "single": {"clip": "hit.wav"}}"#,
    );
    write_file(&dir, "notes.txt", b"not a preset");

    let registry = DirectoryRegistry::new(&dir);
    let presets = registry.find_all_presets().unwrap();

    assert_eq!(presets.len(), 1);
    assert_eq!(presets[0].name(), "hit");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_end_to_end_directory_to_dispatch() {
    let dir = temp_preset_dir("dispatch");
    write_file(&dir, "c1.wav", b"fake wav data");
    write_file(&dir, "c2.wav", b"fake wav data");
    write_file(&dir, "c3.wav", b"fake wav data");

    write_file(
        &dir,
        "step.json",
        br#"{"name": "step", "volume": 0.5,
             "multi": {"mode": "play_all", "clips": ["c1.wav", "c2.wav", "c3.wav"]}}"#,
    );

    let registry = DirectoryRegistry::new(&dir);
    let (output, recorder) = MockOutput::new();
    let mut manager = SoundManager::with_rng(
        output,
        SoundManagerConfig::default(),
        StdRng::seed_from_u64(42),
    );
    manager.initialize(&registry).unwrap();

    manager.play_sound("step");

    assert_eq!(
        recorder.one_shots.lock().clone(),
        vec![
            ("c1".to_string(), 0.5),
            ("c2".to_string(), 0.5),
            ("c3".to_string(), 0.5),
        ]
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_single_preset_scenario() {
    let preset = SoundPreset::single("hit", Clip::from_bytes("C1", vec![0u8; 4]))
        .with_volume(VolumePolicy::fixed(0.8));
    let (mut manager, recorder) = manager_with_mock(vec![preset]);

    manager.play_sound("hit");

    assert_eq!(
        recorder.one_shots.lock().clone(),
        vec![("C1".to_string(), 0.8)]
    );
}

#[test]
fn test_duplicate_name_scenario() {
    let first = SoundPreset::single("coin", Clip::from_bytes("first", vec![0u8; 4]));
    let second = SoundPreset::single("coin", Clip::from_bytes("second", vec![0u8; 4]));
    let (mut manager, recorder) = manager_with_mock(vec![first, second]);

    manager.play_sound("coin");

    let shots = recorder.one_shots.lock().clone();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].0, "first");
}

#[test]
fn test_music_round_trip() {
    let (output, recorder) = MockOutput::new();
    let mut manager = SoundManager::with_rng(
        output,
        SoundManagerConfig {
            play_music_on_start: true,
            music_loops: true,
            music_track: Some(Clip::from_bytes("theme", vec![0u8; 4])),
        },
        StdRng::seed_from_u64(42),
    );

    manager.initialize(&StaticRegistry::new()).unwrap();
    assert_eq!(
        recorder.music.lock().clone(),
        vec![("theme".to_string(), true)]
    );

    manager.play_music(false);
    assert_eq!(recorder.music.lock().len(), 2);

    manager.shutdown();
    assert!(!manager.is_ready());
}
