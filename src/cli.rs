//! Argument structs and process setup shared by the executables.

use crate::backend::*;
use crate::boundary::BoundaryProfile;
use crate::build_info;
use crate::dump::DEFAULT_FIELD_WIDTH;
use crate::solver::*;
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

#[cfg(feature = "profile-with-puffin")]
static PUFFIN_SERVER: std::sync::Mutex<Option<puffin_http::Server>> =
    std::sync::Mutex::new(None);

/// Options every executable accepts.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// The number of threads to use.
    #[arg(short, long, default_value = "8")]
    pub threads: usize,

    /// Log level: error, warn, info, debug or trace. RUST_LOG wins if set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl CommonArgs {
    /// Logging, profiler and the global rayon pool.
    /// Exits the process after printing when `--build-info` is given.
    pub fn setup(&self, name: &str) -> anyhow::Result<()> {
        if self.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        init_logging(Some(&self.log_level))?;
        start_profiler()?;

        rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("rayon_thread_{}", i))
            .build_global()
            .context("building the global rayon pool")?;

        log::info!(
            "{}: {} threads, git {}",
            name,
            rayon::current_num_threads(),
            env!("GIT_DESCRIBE")
        );
        Ok(())
    }

    pub fn finish(&self) {
        #[cfg(feature = "profile-with-puffin")]
        {
            log::info!("Flushing profiler");
            profiling::finish_frame!();
            if let Ok(mut server) = PUFFIN_SERVER.lock() {
                server.take();
            }
        }
    }
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse::<LevelFilter>().ok()
}

pub fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| parse_level(&v))
        .or_else(|| level.and_then(parse_level))
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(buf, "[{:5} {}] {}", record.level(), record.target(), record.args())
        })
        .try_init()
        .context("installing the logger")?;
    log::debug!("Logger initialized (level: {})", log_level);
    Ok(())
}

#[cfg(feature = "profile-with-puffin")]
fn start_profiler() -> anyhow::Result<()> {
    let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    log::info!("Run this to view profiling data:  puffin_viewer {server_addr}");
    let server = puffin_http::Server::new(&server_addr)
        .context("starting the puffin server")?;
    profiling::puffin::set_scopes_on(true);
    if let Ok(mut slot) = PUFFIN_SERVER.lock() {
        *slot = Some(server);
    }
    Ok(())
}

#[cfg(not(feature = "profile-with-puffin"))]
fn start_profiler() -> anyhow::Result<()> {
    Ok(())
}

/// Parse `top-left,top-right,bottom-right,bottom-left`.
pub fn parse_corners(s: &str) -> Result<BoundaryProfile, String> {
    let values = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| format!("`{}` is not a number", v.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    match values[..] {
        [top_left, top_right, bottom_right, bottom_left] => Ok(
            BoundaryProfile::new(top_left, top_right, bottom_right, bottom_left),
        ),
        _ => Err(format!("expected 4 corner values, found {}", values.len())),
    }
}

/// Laplace relaxation on a square plate with interpolated edges
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct LaplaceArgs {
    /// Grid side length, including the boundary
    #[arg(short, long)]
    pub size: usize,

    /// Stop once the max cell change is at or below this
    #[arg(short, long)]
    pub accuracy: f64,

    /// Maximum number of sweeps
    #[arg(short, long)]
    pub count: usize,

    /// Measure the error every this many sweeps
    #[arg(long, default_value = "100")]
    pub check_interval: usize,

    /// Corner values: top-left, top-right, bottom-right, bottom-left
    #[arg(long, value_parser = parse_corners, default_value = "10,20,30,20")]
    pub corners: BoundaryProfile,

    /// How sweeps are spread over threads
    #[arg(short, long, value_enum, default_value_t = BackendKind::Rayon)]
    pub backend: BackendKind,

    /// Rows per task for the rayon backend, and chunk size for buffer fills
    #[arg(long, default_value = "8")]
    pub chunk_size: usize,

    /// How roles change between sweeps
    #[arg(long, value_enum, default_value_t = SwapStrategy::RoleFlip)]
    pub swap: SwapStrategy,

    /// Which grid is reported once the loop stops
    #[arg(long, value_enum, default_value_t = OutputSelection::Latest)]
    pub output_selection: OutputSelection,

    /// Directory for `matrix.txt` (and `matrix.png`), created if missing
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Width of each cell in the text dump
    #[arg(long, default_value_t = DEFAULT_FIELD_WIDTH)]
    pub field_width: usize,

    /// Also write a heat map image
    #[arg(short, long, requires("output_dir"))]
    pub write_image: bool,

    /// Print the grid to stdout when it has at most this many rows
    #[arg(long, default_value = "13")]
    pub print_limit: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl LaplaceArgs {
    pub fn cli_setup(name: &str) -> anyhow::Result<Self> {
        let args = LaplaceArgs::parse();
        args.common.setup(name)?;

        if let Some(output_dir) = &args.output_dir {
            std::fs::create_dir_all(output_dir).with_context(|| {
                format!("creating output directory {:?}", output_dir)
            })?;
        }
        Ok(args)
    }

    pub fn boundary(&self) -> BoundaryProfile {
        self.corners
    }

    pub fn solver_parameters(&self) -> SolverParameters {
        SolverParameters::new(self.size, self.accuracy, self.count)
            .with_check_interval(self.check_interval)
            .with_boundary(self.boundary())
            .with_swap_strategy(self.swap)
            .with_output_selection(self.output_selection)
            .with_chunk_size(self.chunk_size.max(1).saturating_mul(self.size.max(1)))
    }

    pub fn backend(&self) -> Backend {
        Backend::from_kind(self.backend, self.chunk_size, self.common.threads)
    }

    fn output_file(&self, file_name: &str) -> Option<PathBuf> {
        self.output_dir.as_ref().map(|dir| {
            let mut path = dir.clone();
            path.push(file_name);
            path
        })
    }

    pub fn dump_path(&self) -> Option<PathBuf> {
        self.output_file("matrix.txt")
    }

    pub fn image_path(&self) -> Option<PathBuf> {
        self.output_file("matrix.png")
    }
}
