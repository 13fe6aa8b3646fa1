//! Headless replay host: runs a recorded match transcript through the frame
//! driver and prints the final standings as JSON.

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stickfight_core::{
    create_initial_state, step, summarize, validate_config, Cue, GameState, MatchSummary,
    MatchTranscript, NULL_INPUT,
};

/// Replay a stickfight match transcript
#[derive(Parser, Debug)]
#[command(name = "stickfight-host")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transcript JSON file (default: stdin)
    transcript: Option<PathBuf>,

    /// Stop after this many frames even if the match is still running
    #[arg(long)]
    max_frames: Option<usize>,

    /// Pretty-print the summary
    #[arg(long)]
    pretty: bool,
}

fn load_transcript(path: Option<&PathBuf>) -> Result<MatchTranscript> {
    let json_str = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read transcript from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json_str).context("failed to parse MatchTranscript JSON")
}

#[derive(Debug, Default)]
struct CueCounts {
    jumps: usize,
    swings: usize,
    hits: usize,
    blocks: usize,
}

impl CueCounts {
    fn record(&mut self, cues: &[Cue]) {
        for cue in cues {
            match cue {
                Cue::Jump(_) => self.jumps += 1,
                Cue::Swing(..) => self.swings += 1,
                Cue::Hit(_) => self.hits += 1,
                Cue::Block(_) => self.blocks += 1,
                Cue::Click => {}
            }
        }
    }
}

fn replay(transcript: &MatchTranscript, max_frames: usize) -> (GameState, CueCounts) {
    let config = &transcript.config;
    let mut state = create_initial_state(config);
    let mut prev_inputs = [NULL_INPUT; 2];
    let mut cues = CueCounts::default();

    for inputs in transcript.frames.iter().take(max_frames) {
        state = step(&state, inputs, &prev_inputs, config);
        prev_inputs = *inputs;
        cues.record(&state.cues);
        if state.match_over {
            debug!(tick = state.tick, "match decided, ignoring remaining frames");
            break;
        }
    }
    (state, cues)
}

fn print_result(summary: &MatchSummary, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)
    } else {
        serde_json::to_string(summary)
    }
    .context("failed to encode summary")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let transcript = load_transcript(args.transcript.as_ref())?;
    validate_config(&transcript.config).context("transcript carries an invalid match config")?;
    info!(
        frames = transcript.frames.len(),
        p0 = %transcript.config.players[0].name,
        p1 = %transcript.config.players[1].name,
        "transcript loaded"
    );

    let start = Instant::now();
    let max_frames = args.max_frames.unwrap_or(usize::MAX);
    let (state, cues) = replay(&transcript, max_frames);
    info!(
        ticks = state.tick,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        jumps = cues.jumps,
        swings = cues.swings,
        hits = cues.hits,
        blocks = cues.blocks,
        "replay finished"
    );
    if !state.match_over {
        warn!("transcript ended before either fighter went down");
    }

    print_result(&summarize(&state, &transcript.config), args.pretty)
}
