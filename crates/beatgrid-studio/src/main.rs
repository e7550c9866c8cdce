use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use beatgrid_engine::labels::{DigitLabels, FontRasterizer};
use beatgrid_engine::logging::{init_logging, LoggingConfig};
use beatgrid_engine::theme::BeatGridTheme;
use beatgrid_engine::track::{BeatGrid, FramePos, LoadedTrack};
use beatgrid_engine::view::{PositionKind, ScrollingView};
use beatgrid_engine::{BeatGridRenderer, PassOutcome};

/// Scrolls a simulated waveform across a constant-tempo track and reports
/// what the beat-grid overlay produces each frame.
#[derive(Parser, Debug)]
#[command(name = "beatgrid-studio")]
struct Args {
    /// Track tempo.
    #[arg(long, default_value_t = 128.0)]
    bpm: f64,

    /// Track length in seconds.
    #[arg(long, default_value_t = 240.0)]
    seconds: f64,

    #[arg(long, default_value_t = 44_100.0)]
    sample_rate: f64,

    /// Position of the first beat, in seconds (may be negative).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    first_beat: f64,

    /// Seconds of audio visible across the widget.
    #[arg(long, default_value_t = 8.0)]
    zoom: f64,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 12)]
    frames: u32,

    /// Seconds scrolled per frame.
    #[arg(long, default_value_t = 0.5)]
    step: f64,

    #[arg(long, default_value_t = 1024.0)]
    width: f32,

    #[arg(long, default_value_t = 120.0)]
    breadth: f32,

    #[arg(long, default_value_t = 1.0)]
    device_pixel_ratio: f32,

    /// Overlay opacity in percent; omit to use the theme color's own alpha.
    #[arg(long)]
    alpha: Option<u8>,

    /// Engage slip mode halfway through and draw the slip grid too.
    #[arg(long)]
    slip: bool,

    /// Theme TOML file.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// TrueType/OpenType font for bar labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "beatgrid_engine=debug".
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let theme = match &args.theme {
        Some(path) => BeatGridTheme::load(path).context("loading theme")?,
        None => BeatGridTheme::default(),
    };

    let font = load_font(args.font.as_ref())?;
    let rasterizer = || FontRasterizer::from_bytes(&font).context("parsing font");
    let mut labels = DigitLabels::new(rasterizer()?);
    let mut slip_labels = DigitLabels::new(rasterizer()?);

    let total_samples = args.seconds * args.sample_rate;
    let beats = BeatGrid::from_bpm(
        FramePos(args.first_beat * args.sample_rate),
        args.bpm,
        args.sample_rate,
        total_samples,
    )
    .context("building beat grid")?;
    log::info!(
        "track: {:.1}s at {} bpm, {} beats",
        args.seconds,
        args.bpm,
        beats.len()
    );

    let mut view = ScrollingView::new(LoadedTrack::new(total_samples, Some(beats)));
    view.visible_samples = args.zoom * args.sample_rate;
    view.width = args.width;
    view.breadth = args.breadth;
    view.device_pixel_ratio = args.device_pixel_ratio;
    view.beat_grid_alpha = args.alpha;

    let mut play = BeatGridRenderer::new(PositionKind::Play);
    let mut slip = BeatGridRenderer::new(PositionKind::Slip);
    play.setup(&theme);
    slip.setup(&theme);

    for frame in 0..args.frames {
        if args.slip && frame == args.frames / 2 {
            view.slip_active = true;
            log::info!("slip mode engaged");
            slip.request_recompute();
        }

        if let Some(outcome) = play.preprocess(&view, &mut labels) {
            report(frame, outcome, &play, labels.labels().len());
        }
        if let Some(outcome) = slip.preprocess(&view, &mut slip_labels) {
            report(frame, outcome, &slip, slip_labels.labels().len());
        }

        // Stand-in for the GPU upload: take the flags, note the byte count.
        for renderer in [&mut play, &mut slip] {
            let flags = renderer.consume_dirty();
            if flags.geometry {
                log::debug!("upload {} bytes", renderer.geometry().as_bytes().len());
            }
        }

        view.advance(args.step * args.sample_rate);
        play.request_recompute();
        if view.slip_active {
            slip.request_recompute();
        }
    }

    Ok(())
}

fn report(frame: u32, outcome: PassOutcome, renderer: &BeatGridRenderer, labels: usize) {
    let name = match renderer.position_kind() {
        PositionKind::Play => "play",
        PositionKind::Slip => "slip",
    };
    match outcome {
        PassOutcome::Drawn { beats } => {
            let tiers = renderer.tier_counts();
            log::info!(
                "frame {frame:>3} [{name}] {beats} beats ({} phrase, {} bar, {} beat), \
                 {} vertices, {labels} labels",
                tiers.phrase,
                tiers.bar,
                tiers.beat,
                renderer.geometry().vertex_count()
            );
        }
        PassOutcome::Empty => log::info!("frame {frame:>3} [{name}] nothing to draw"),
        PassOutcome::Skipped(reason) => {
            log::info!("frame {frame:>3} [{name}] skipped: {reason:?}")
        }
    }
}

fn load_font(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    if let Some(path) = path {
        return std::fs::read(path).with_context(|| format!("reading font {}", path.display()));
    }
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
    .context("no system font found; pass --font")
}
