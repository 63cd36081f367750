use anyhow::{Context, Result, anyhow, ensure};
use async_channel::Receiver;
use clap::Parser;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::thread;
use sweepscope::dsp::engine::{SweepEngine, SweepOutput, clamp_sample_count};
use sweepscope::dsp::params::{Parameters, PhaseUnit, Waveform};
use sweepscope::dsp::sweep::SweepLeg;
use sweepscope::export;
use sweepscope::session::{self, SessionHandle};
use sweepscope::settings::{self, ParameterChange, ScopeSettings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Oscilloscope sweep and trace simulator")]
struct Args {
    /// Settings file; defaults to $XDG_CONFIG_HOME/sweepscope/settings.json.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    amplitude: Option<f64>,
    #[arg(long)]
    frequency_factor: Option<f64>,
    /// Phase, in the unit given by --phase-unit (or the settings file).
    #[arg(long, allow_hyphen_values = true)]
    phase: Option<f64>,
    #[arg(long)]
    phase_unit: Option<PhaseUnit>,
    #[arg(long)]
    waveform: Option<Waveform>,
    #[arg(long)]
    forward_factor: Option<f64>,
    #[arg(long)]
    return_factor: Option<f64>,
    #[arg(long)]
    samples: Option<usize>,
    /// Write computed frames as JSON; `-` writes to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Read `<control> <value>` lines from stdin and recompute on each.
    #[arg(long)]
    interactive: bool,
}

impl Args {
    // Unit goes first so --phase is read in the requested unit.
    fn overrides(&self) -> Vec<ParameterChange> {
        [
            self.phase_unit.map(ParameterChange::PhaseUnit),
            self.amplitude.map(ParameterChange::Amplitude),
            self.frequency_factor.map(ParameterChange::FrequencyFactor),
            self.phase.map(ParameterChange::Phase),
            self.waveform.map(ParameterChange::Waveform),
            self.forward_factor.map(ParameterChange::ForwardFactor),
            self.return_factor.map(ParameterChange::ReturnFactor),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut scope_settings: ScopeSettings = match &args.config {
        Some(path) => settings::load_from(path)?,
        None => settings::load_or_default(),
    };
    if let Some(samples) = args.samples {
        scope_settings.sample_count = clamp_sample_count(samples);
    }

    let mut params = scope_settings.parameters;
    for change in args.overrides() {
        change.apply(&mut params);
    }
    ensure!(params.is_finite(), "parameters must be finite numbers");

    let engine = SweepEngine::new(scope_settings.engine_config());
    info!(
        "[scope] {} samples, settings from {:?}",
        engine.config().sample_count,
        args.config
            .clone()
            .unwrap_or_else(settings::default_settings_path)
    );

    if args.interactive {
        return run_interactive(engine, params, args.output.as_deref());
    }

    let frame = engine.compute(&params);
    log_frame(&frame);
    if let Some(dest) = &args.output {
        export::write_frame(dest, &frame)?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn log_frame(frame: &SweepOutput) {
    let forward = frame
        .segments
        .iter()
        .filter(|s| s.kind == SweepLeg::Forward)
        .count();
    info!(
        "[scope] {} | {} | {} segments ({forward} forward) over {:.3}s",
        frame.hints.sweep_title,
        frame.hints.legend.replace('\n', ", "),
        frame.segments.len(),
        frame.derived.total_time
    );
}

fn run_interactive(engine: SweepEngine, params: Parameters, output: Option<&Path>) -> Result<()> {
    let session = session::spawn(engine, params).context("failed to start session worker")?;
    let frames = session.frames().clone();

    let result = thread::scope(|scope| {
        let presenter = scope.spawn(move || {
            let presented = present_frames(&frames, output);
            // Unblocks the worker if presenting failed part-way.
            frames.close();
            presented
        });

        let read = forward_control_lines(&session, io::stdin().lock());
        session.close();
        let presented = presenter
            .join()
            .map_err(|_| anyhow!("presenter thread panicked"))?;
        read.and(presented)
    });

    let final_params = session.join()?;
    info!("[scope] final parameters: {final_params:?}");
    result
}

fn present_frames(frames: &Receiver<SweepOutput>, output: Option<&Path>) -> Result<()> {
    while let Ok(frame) = frames.recv_blocking() {
        log_frame(&frame);
        if let Some(dest) = output {
            export::write_frame(dest, &frame)?;
        }
    }
    Ok(())
}

fn forward_control_lines(session: &SessionHandle, input: impl BufRead) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read control input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit" | "q") {
            break;
        }
        match line.parse::<ParameterChange>() {
            Ok(change) => session.send(change)?,
            Err(err) => warn!("[controls] ignoring '{line}': {err:#}"),
        }
    }
    Ok(())
}
