use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::info;

use eversion::{
    eval::{PhaseSchedule, ThreadPool},
    mesh::{Animation, Mesh, MeshStyle, Sphere},
};

/// Sphere eversion demo
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mesh a single moment of the eversion
    Mesh {
        #[clap(flatten)]
        settings: SphereSettings,

        /// Position on the timeline, in `[0, 1]`
        #[clap(short = 'T', long, default_value_t = 0.5)]
        time: f64,

        /// Name of a `.stl` or `.obj` file to write
        #[clap(short, long)]
        out: Option<PathBuf>,

        /// Number of times to mesh (for benchmarking)
        #[clap(short = 'N', default_value_t = 1)]
        n: usize,
    },

    /// Write a back-and-forth animation as numbered mesh files
    Frames {
        #[clap(flatten)]
        settings: SphereSettings,

        /// Directory in which to write frames
        #[clap(short, long)]
        out: PathBuf,

        /// Number of frames to write
        #[clap(short = 'n', long, default_value_t = 64)]
        count: usize,

        /// Time step between frames, as a fraction (`1 / steps`)
        #[clap(long, default_value_t = 256)]
        steps: u32,

        /// Mesh file format
        #[clap(short, long, value_enum, default_value_t = Format::Stl)]
        format: Format,
    },

    /// Print the phase that is active at a given time
    Phase {
        /// Position on the timeline, in `[0, 1]`
        time: f64,

        #[clap(flatten)]
        schedule: ScheduleSettings,
    },
}

#[derive(ValueEnum, Copy, Clone)]
enum Format {
    Stl,
    Obj,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("obj") => Format::Obj,
            _ => Format::Stl,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Format::Stl => "stl",
            Format::Obj => "obj",
        }
    }
}

#[derive(Parser)]
struct ScheduleSettings {
    /// Start of corrugation
    #[clap(long, default_value_t = 0.00)]
    corr_start: f64,

    /// Start of push (poles pass through each other)
    #[clap(long, default_value_t = 0.10)]
    push_start: f64,

    /// Start of twist (poles turn in opposite directions)
    #[clap(long, default_value_t = 0.23)]
    twist_start: f64,

    /// Start of unpush (poles pulled back apart)
    #[clap(long, default_value_t = 0.60)]
    unpush_start: f64,

    /// Start of uncorrugation
    #[clap(long, default_value_t = 0.93)]
    uncorr_start: f64,
}

impl ScheduleSettings {
    fn build(&self) -> Result<PhaseSchedule> {
        let s = PhaseSchedule::new(
            self.corr_start,
            self.push_start,
            self.twist_start,
            self.unpush_start,
            self.uncorr_start,
        )?;
        Ok(s)
    }
}

#[derive(Parser)]
struct SphereSettings {
    /// Number of strips in a full revolution
    #[clap(short, long, default_value_t = 8)]
    strips: u32,

    /// Number of strips to show per hemisphere (defaults to all)
    #[clap(long)]
    show_strips: Option<u32>,

    /// Latitude patches per hemisphere
    #[clap(long, default_value_t = 12)]
    lat: usize,

    /// Longitude patches per strip
    #[clap(long, default_value_t = 12)]
    long: usize,

    /// Number of hemispheres to show
    #[clap(
        long,
        default_value_t = 2,
        value_parser = clap::value_parser!(u32).range(1..=2)
    )]
    hemispheres: u32,

    /// Only compute half of each strip
    #[clap(long)]
    half: bool,

    /// Patches to emit (polygons, bands, or checkered)
    #[clap(long, default_value_t = MeshStyle::Polygons)]
    style: MeshStyle,

    /// Show the cylinder bending into a sphere at this time, instead of the
    /// eversion
    #[clap(long)]
    bend_time: Option<f64>,

    /// Number of threads to use
    #[clap(short, long)]
    threads: Option<NonZeroUsize>,

    #[clap(flatten)]
    schedule: ScheduleSettings,
}

impl SphereSettings {
    fn sphere(&self, time: f64) -> Result<Sphere> {
        let mut sphere = Sphere::default();
        sphere.lat_patches = self.lat;
        sphere.long_patches = self.long;
        sphere.half_strips = self.half;
        sphere.bend_time = self.bend_time;
        sphere.schedule = self.schedule.build()?;
        sphere.set_num_strips(self.strips);
        if let Some(n) = self.show_strips {
            sphere.set_strips_to_display(n);
        }
        if self.hemispheres == 1 {
            sphere.toggle_hemispheres();
        }
        sphere.set_time(time);
        Ok(sphere)
    }

    fn pool(&self) -> Result<Option<ThreadPool>> {
        let out = match self.threads {
            Some(n) if n.get() > 1 => Some(ThreadPool::Custom(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n.get())
                    .build()?,
            )),
            _ => None,
        };
        Ok(out)
    }
}

/// Uses the global pool unless a thread count was given; a count of 1 means
/// single-threaded evaluation
fn pick_threads(
    pool: &Option<ThreadPool>,
    requested: Option<NonZeroUsize>,
) -> Option<&ThreadPool> {
    match (pool, requested) {
        (Some(p), _) => Some(p),
        (None, None) => Some(&ThreadPool::Global),
        (None, Some(_)) => None,
    }
}

fn write_mesh(mesh: &Mesh, path: &Path, format: Format) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    match format {
        Format::Stl => mesh.write_stl(&mut file)?,
        Format::Obj => mesh.write_obj(&mut file)?,
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////

fn run_mesh(
    settings: &SphereSettings,
    time: f64,
    n: usize,
    threads: Option<&ThreadPool>,
) -> Result<Mesh> {
    let sphere = settings.sphere(time)?;
    let mut mesh = Mesh::new();
    for _ in 0..n {
        let (grid, phase) = sphere.grid(threads)?;
        match phase {
            Some((phase, t)) => info!("{phase} at local time {t:.4}"),
            None => info!("time {time} is before the first phase"),
        }
        mesh = sphere.assemble(&grid, settings.style);
    }
    Ok(mesh)
}

fn run_frames(
    settings: &SphereSettings,
    out: &Path,
    count: usize,
    steps: u32,
    format: Format,
    threads: Option<&ThreadPool>,
) -> Result<()> {
    std::fs::create_dir_all(out)?;
    let mut sphere = settings.sphere(0.0)?;
    let mut anim = Animation {
        delta: 1.0 / steps.max(1) as f64,
        ..Default::default()
    };
    for i in 0..count {
        info!("t = {:.4}, delta_t = 1/{steps}", sphere.time());
        let mesh = sphere.mesh(settings.style, threads)?;
        let path = out.join(format!("frame_{i:04}.{}", format.extension()));
        write_mesh(&mesh, &path, format)?;
        anim.advance(&mut sphere);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();

    match args.cmd {
        Command::Mesh {
            settings,
            time,
            out,
            n,
        } => {
            let pool = settings.pool()?;
            let threads = pick_threads(&pool, settings.threads);
            let start = Instant::now();
            let mesh = run_mesh(&settings, time, n, threads)?;
            info!(
                "Meshed {}x at {:?} ms/iter",
                n,
                start.elapsed().as_micros() as f64 / 1000.0 / (n as f64)
            );
            info!(
                "{} vertices, {} triangles",
                mesh.vertices.len(),
                mesh.triangles.len()
            );
            if let Some(out) = out {
                let format = Format::from_path(&out);
                info!("Writing {} to {out:?}", format.extension());
                write_mesh(&mesh, &out, format)?;
            }
        }
        Command::Frames {
            settings,
            out,
            count,
            steps,
            format,
        } => {
            let pool = settings.pool()?;
            let threads = pick_threads(&pool, settings.threads);
            let start = Instant::now();
            run_frames(&settings, &out, count, steps, format, threads)?;
            info!("Wrote {count} frames to {out:?} in {:?}", start.elapsed());
        }
        Command::Phase { time, schedule } => {
            let schedule = schedule.build()?;
            match schedule.locate(time) {
                Some((phase, t)) => {
                    let (start, end) = schedule.span(phase).unwrap_or_default();
                    println!(
                        "{time}: {phase} ({start} to {end}), local time {t:.4}"
                    );
                }
                None => println!("{time}: before the first phase"),
            }
        }
    }

    Ok(())
}
