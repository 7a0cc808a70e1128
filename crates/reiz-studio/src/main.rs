//! Demo session: wait for F5, then run a few fixation/target trials.
//!
//! Escape ends the session, P pauses between trials.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use reiz_engine::audio::{AudioClip, AudioLibrary, Speaker};
use reiz_engine::logging::{LoggingConfig, init_logging};
use reiz_engine::visual::{Background, Circle, Cross, Mural};
use reiz_engine::{Canvas, CanvasConfig, CanvasError, Color, FpsPolicy, Stimulus, Visual};

const TARGET_FPS: f64 = 60.0;
const FIXATION: Duration = Duration::from_millis(1000);
const TARGET: Duration = Duration::from_millis(400);
const FONT: &str = "DejaVu Sans";

#[derive(Parser, Debug)]
#[command(version, about = "Fixation/target demo session for the reiz engine", long_about = None)]
struct Args {
    /// Directory of WAV files; the first clip plays with each target.
    /// Without it the target plays a generated tone.
    audio_dir: Option<PathBuf>,

    /// Number of trials after the start key.
    #[arg(short, long, default_value_t = 5)]
    trials: usize,

    /// Window width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args = Args::parse();
    match run(args) {
        Err(e) if matches!(e.downcast_ref::<CanvasError>(), Some(CanvasError::Closed)) => {
            log::info!("session ended by user");
            Ok(())
        }
        other => other,
    }
}

fn run(args: Args) -> Result<()> {
    let clip = load_clip(args.audio_dir)?;
    let mut speaker = match Speaker::new() {
        Ok(speaker) => Some(speaker),
        Err(e) => {
            log::warn!("continuing without sound: {e}");
            None
        }
    };

    let config = CanvasConfig::windowed(args.width, args.height).with_title("reiz studio");
    let mut canvas = Canvas::new(config)?;
    canvas.open()?;

    if !canvas.is_fps_feasible(TARGET_FPS, FpsPolicy::Report)? {
        log::warn!("display cannot sustain {TARGET_FPS} fps; timings will drift");
    }

    let prompt = Mural::new("Press F5 to start").font(FONT);
    while !canvas.start_run() {
        canvas.show(&prompt)?;
    }

    let paused = Mural::new("Paused (P to resume)").font(FONT).color(Color::named("gray")?);
    let fixation = [Visual::from(Background::new(Color::black())), Cross::new().into()];

    for trial in 0..args.trials {
        while canvas.paused() {
            canvas.show(&paused)?;
        }

        log::info!("trial {}/{}", trial + 1, args.trials);
        present_for(&mut canvas, &fixation, FIXATION)?;

        let target = Circle::new()
            .position((if trial % 2 == 0 { -0.5f32 } else { 0.5 }, 0.0f32))
            .zoom(1.5);
        if let Some(speaker) = speaker.as_mut() {
            speaker.play(&clip)?;
        }
        present_for(&mut canvas, &target, TARGET)?;
    }

    canvas.show(&Mural::new("Thank you").font(FONT))?;
    std::thread::sleep(Duration::from_secs(1));
    canvas.close()?;
    Ok(())
}

/// Shows `stimulus` on every frame until `duration` has elapsed.
fn present_for<S: Stimulus + ?Sized>(
    canvas: &mut Canvas,
    stimulus: &S,
    duration: Duration,
) -> Result<(), CanvasError> {
    let start = Instant::now();
    while start.elapsed() < duration {
        canvas.show(stimulus)?;
    }
    Ok(())
}

fn load_clip(audio_dir: Option<PathBuf>) -> Result<AudioClip> {
    let Some(dir) = audio_dir else {
        return Ok(AudioClip::tone(440.0, Duration::from_millis(200), 44_100));
    };

    let library = AudioLibrary::load(&dir)
        .with_context(|| format!("failed to load audio library from {}", dir.display()))?;
    let (name, clip) = library
        .iter()
        .next()
        .with_context(|| format!("no audio clips in {}", dir.display()))?;
    log::info!("using clip `{name}` from {} clips", library.len());
    Ok(clip.clone())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn audio_dir_is_optional() {
        let args = Args::try_parse_from(["reiz-studio"]).unwrap();
        assert!(args.audio_dir.is_none());
        assert_eq!((args.trials, args.width, args.height), (5, 800, 600));

        let args = Args::try_parse_from(["reiz-studio", "media/wav", "-t", "3"]).unwrap();
        assert_eq!(args.audio_dir, Some(PathBuf::from("media/wav")));
        assert_eq!(args.trials, 3);
    }

    #[test]
    fn help_is_not_taken_for_a_directory() {
        let err = Args::try_parse_from(["reiz-studio", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
