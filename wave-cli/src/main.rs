mod schedule;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schedule::Schedule;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wave_core::{Control, Disturbance, FixedStepper, Grid, WaveField};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Grid size N (NxN)
    #[arg(long, default_value_t = 40)]
    size: usize,

    /// Propagation speed
    #[arg(long, default_value_t = 4.0)]
    speed: f64,

    /// Base damping inside the sponge-free interior
    #[arg(long, default_value_t = 0.02)]
    damping: f64,

    /// Fixed physics increment per step
    #[arg(long, default_value_t = 0.04)]
    dt: f64,

    /// Simulated wall-clock time per frame (seconds)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,

    /// Number of frames to run and record
    #[arg(long, default_value_t = 600)]
    frames: usize,

    /// Frames between random impulses (0 disables)
    #[arg(long, default_value_t = 90)]
    impulse_every: usize,

    /// Smallest random impulse
    #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
    impulse_min: f64,

    /// Largest random impulse
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    impulse_max: f64,

    /// Scripted controls, e.g. "120:speed+,300:damping-,450:reset"
    #[arg(long, default_value = "")]
    controls: String,

    /// RNG seed (reproducibility)
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct ImpulseRow {
    row: usize,
    col: usize,
    value: f64,
}

impl From<Disturbance> for ImpulseRow {
    fn from(d: Disturbance) -> Self {
        ImpulseRow {
            row: d.row,
            col: d.col,
            value: d.value,
        }
    }
}

#[derive(Serialize)]
struct MetaRow {
    frame: usize,
    time: f64,
    steps: u32,

    size: usize,
    speed: f64,
    damping: f64,

    controls: Vec<&'static str>,
    impulses: Vec<ImpulseRow>,

    peak: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.impulse_min > args.impulse_max {
        bail!("impulse_min must be <= impulse_max");
    }

    let schedule = Schedule::parse(&args.controls)?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let mut surface_writer = BufWriter::new(
        File::create(args.out.join("surface.bin")).context("creating surface.bin")?,
    );
    let mut meta_file = BufWriter::new(
        OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(args.out.join("meta.jsonl"))
            .context("creating meta.jsonl")?,
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut field = WaveField::new(args.size, args.speed, args.damping)?;
    let mut stepper = FixedStepper::new(args.dt)?;

    if !field.is_stable(args.dt) {
        info!(
            alpha = field.alpha(args.dt),
            "speed * dt >= 1, steps will be skipped until speed drops"
        );
    }

    info!(
        size = field.size(),
        sponge = field.sponge_thickness(),
        speed = field.speed(),
        damping = field.damping(),
        frames = args.frames,
        scripted = schedule.len(),
        "starting run"
    );

    let mut time = 0.0;
    let mut total_steps: u64 = 0;

    for frame in 0..args.frames {
        let mut controls = Vec::new();
        let mut impulses = Vec::new();

        for &control in schedule.at(frame) {
            if let Some(d) = control.apply(&mut field, &mut rng)? {
                impulses.push(ImpulseRow::from(d));
            }
            if control == Control::Reset {
                stepper.reset();
            }
            controls.push(control.as_str());
        }

        if args.impulse_every > 0 && frame % args.impulse_every == 0 {
            let d = field.add_random_disturbance(&mut rng, args.impulse_min, args.impulse_max)?;
            debug!(frame, row = d.row, col = d.col, value = d.value, "random impulse");
            impulses.push(ImpulseRow::from(d));
        }

        let steps = stepper.advance(&mut field, args.frame_dt);
        time += steps as f64 * stepper.dt();
        total_steps += u64::from(steps);

        let surface = field.surface();
        write_grid(&mut surface_writer, surface)?;

        let row = MetaRow {
            frame,
            time,
            steps,

            size: field.size(),
            speed: field.speed(),
            damping: field.damping(),

            controls,
            impulses,

            peak: surface.max_abs(),
        };

        serde_json::to_writer(&mut meta_file, &row)?;
        meta_file.write_all(b"\n")?;
    }

    surface_writer.flush()?;
    meta_file.flush()?;

    info!(
        frames = args.frames,
        steps = total_steps,
        time,
        out = %args.out.display(),
        "run finished"
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn write_grid<W: Write>(w: &mut W, g: &Grid) -> std::io::Result<()> {
    for x in g.iter() {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}
