use std::thread;
use std::time::Duration;

use anyhow::Context;

use soundbank::{
    AppResult, Clip, Config, DirectoryRegistry, RodioOutput, SoundManager, SoundManagerConfig,
};

fn main() {
    initialize_tracing();

    println!("===========================================");
    println!("  soundbank - preset sound player");
    println!("===========================================\n");

    let cfg = match Config::load() {
        Ok(cfg) => {
            println!("✓ Configuration loaded");
            println!("  Preset dir: {}", cfg.preset_dir);
            if let Some(music) = &cfg.music_file {
                println!("  Music: {}", music);
            }
            println!();
            cfg
        }
        Err(e) => {
            eprintln!("✗ Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cfg) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cfg: &Config) -> AppResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("Usage: soundbank <sound-name>...");
        println!("       soundbank music");
        println!("\nSound names come from the preset files in '{}'.", cfg.preset_dir);
        return Ok(());
    }

    let mut output = RodioOutput::new().context("initializing audio output")?;
    output.set_music_volume(cfg.music_volume);

    let music_track = match &cfg.music_file {
        Some(path) => {
            let clip =
                Clip::from_file(path).with_context(|| format!("loading music track {}", path))?;
            Some(clip)
        }
        None => None,
    };

    let manager_config = SoundManagerConfig {
        play_music_on_start: cfg.play_music_on_start,
        music_loops: cfg.loop_music,
        music_track,
    };

    let registry = DirectoryRegistry::new(&cfg.preset_dir);
    let mut manager = SoundManager::new(output, manager_config);
    manager.set_sound_effects_enabled(cfg.sound_effects_enabled);
    manager
        .initialize(&registry)
        .context("scanning sound presets")?;
    println!("✓ Sound manager ready ({} presets)\n", manager.preset_count());

    for name in &args {
        if name == "music" {
            manager.play_music(cfg.loop_music);
        } else {
            manager.play_sound(name);
        }
    }

    // One-shots are fire-and-forget; keep the process alive long enough to
    // hear them before shutting the output down
    thread::sleep(Duration::from_secs(5));
    manager.shutdown();

    Ok(())
}

/// Initialize tracing with console and file logging.
///
/// Log rotation: daily files named soundbank.log.YYYY-MM-DD under the
/// platform config directory.
fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("soundbank").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "soundbank.log");

    // Info level by default, overridable through RUST_LOG
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();
}
