use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use engine::{prelude::*, Config, ManualClock, WallClock};
use rand::{rngs::StdRng, Rng, SeedableRng};

mod map_view;

pub const APP_NAME: &str = "fogwatch";

/// Simulated frame length in milliseconds.
const FRAME_MS: i64 = 50;

/// Frames per observer step.
const FRAMES_PER_STEP: usize = 4;

#[derive(Parser, Debug)]
#[command(about = "Walk an observer through the fog of war")]
struct Args {
    #[arg(long, help = "IDM configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Visibility radius, overrides config")]
    radius: Option<i32>,

    #[arg(long, help = "Reveal fade duration in milliseconds")]
    fade_ms: Option<i64>,

    #[arg(long, default_value_t = 40, help = "Number of observer steps")]
    steps: usize,

    #[arg(long, help = "Random walk seed")]
    seed: Option<u64>,

    #[arg(long, help = "Load discovery history from file")]
    load: Option<PathBuf>,

    #[arg(long, help = "Save discovery history to file")]
    save: Option<PathBuf>,

    #[arg(long, help = "Countdown length in seconds, overrides config")]
    timer: Option<f64>,

    #[arg(long, default_value_t = 12, help = "Half width of printed map")]
    view: i32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(radius) = args.radius {
        config.fog.radius = radius;
    }
    if let Some(fade_ms) = args.fade_ms {
        config.fog.fade_ms = fade_ms;
    }
    if let Some(duration) = args.timer {
        config.timer.duration = duration;
    }

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    // Simulate frames on a clock that starts from real time.
    let clock = ManualClock::new(WallClock.now());
    let mut fog = Fog::with_clock(&config.fog, clock.clone());
    let mut timer = Timer::from_config(&config.timer, clock.clone());

    timer.subscribe(|e| {
        if !matches!(e.kind, TimerEventKind::Updated) {
            log::info!("timer {}: {:.1} s left", e.kind, e.remaining);
        }
        Ok(())
    });
    timer.on_expire(|| log::warn!("time is up"));

    if let Some(path) = &args.load {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        fog.deserialize(FogSave::from_bytes(&bytes)?);
    }

    timer.start();

    let mut pos = IVec2::ZERO;
    for _ in 0..args.steps {
        pos += util::DIR_8[rng.random_range(0..util::DIR_8.len())];
        for _ in 0..FRAMES_PER_STEP {
            fog.update(pos);
            fog.tick();
            timer.tick();
            clock.advance(FRAME_MS);
        }
    }

    print!("{}", map_view::view_map(&fog, pos, args.view));
    println!(
        "observer {pos}, {} visible, {} discovered, {} fading in",
        fog.visible_count(),
        fog.discovered_count(),
        fog.reveal_count()
    );
    println!("timer {timer} ({:?})", timer.state());

    if let Some(path) = &args.save {
        std::fs::write(path, fog.serialize().to_bytes()?)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("saved discovery history to {}", path.display());
    }

    Ok(())
}
