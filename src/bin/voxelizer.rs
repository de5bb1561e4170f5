//! Command line front-end: loads a mesh, voxelizes it and saves the voxel grid.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;
use voxelizer3d::transformation::binvox::save_binvox;
use voxelizer3d::transformation::load_mesh;
use voxelizer3d::transformation::voxelization::{voxelize, RayParityClassifier, RaySampling};

#[derive(Parser, Debug)]
#[command(name = "voxelizer", version)]
#[command(about = "A simple voxelization utility.", long_about = None)]
struct Cli {
    /// Path to the mesh to voxelize (.obj or .ply)
    input: PathBuf,

    /// Path to save the voxel grid to, without extension
    output: PathBuf,

    /// Voxel grid save format: obj or binvox (only the first letter matters)
    #[arg(short, long, default_value = "binvox")]
    format: String,

    /// Number of voxels along each axis
    #[arg(short, long, default_value_t = 32)]
    resolution: u32,

    /// Number of sample rays per voxel, negative for a single fixed direction
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    samples: i32,

    /// Verbosity level, repeat for more verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    Binvox,
    Obj,
}

impl OutputFormat {
    fn parse(format: &str) -> Option<Self> {
        match format.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('b') => Some(OutputFormat::Binvox),
            Some('o') => Some(OutputFormat::Obj),
            _ => None,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Binvox => "binvox",
            OutputFormat::Obj => "obj",
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::from_default_env();
    if verbose > 0 || std::env::var_os("RUST_LOG").is_none() {
        let _ = builder.filter_level(level);
    }
    builder.init();
}

fn with_extension(output: &Path, format: OutputFormat) -> PathBuf {
    let mut path = OsString::from(output);
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    log::debug!("input:      {}", cli.input.display());
    log::debug!("output:     {}", cli.output.display());
    log::debug!("resolution: {}", cli.resolution);
    log::debug!("samples:    {}", cli.samples);

    let format = OutputFormat::parse(&cli.format);

    match format {
        Some(format) => log::debug!("save format: {:?}", format),
        None => log::warn!(
            "Unknown file format {:?} specified, use one of: (o) obj, (b) binvox.",
            cli.format
        ),
    }

    log::info!("Loading mesh.");
    let mesh = load_mesh(&cli.input, true)
        .with_context(|| format!("failed to load the mesh {}", cli.input.display()))?;

    let sampling = RaySampling::from(cli.samples);
    if let RaySampling::Sampled(n) = sampling {
        log::info!("Randomly choosing {} directions.", n);
    }

    let start = Instant::now();
    let classifier = RayParityClassifier::new(sampling);
    let voxelized = voxelize(&mesh, cli.resolution, &classifier)
        .with_context(|| format!("failed to voxelize {}", cli.input.display()))?;
    let grid = &voxelized.grid;

    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    log::info!(
        "Summary: {} ({} triangles) @ {}x{}x{}, {} sample(s) in: {:.3} seconds",
        file_name,
        voxelized.num_triangles,
        grid.dim_x(),
        grid.dim_y(),
        grid.dim_z(),
        classifier.directions().len(),
        start.elapsed().as_secs_f32()
    );

    log::info!("Saving results.");
    let Some(format) = format else {
        bail!(
            "failed to save: unknown output format {:?}, use one of: (o) obj, (b) binvox",
            cli.format
        );
    };

    let path = with_extension(&cli.output, format);
    let context = || format!("failed to save {}", path.display());
    match format {
        OutputFormat::Binvox => save_binvox(grid, &path).with_context(context)?,
        OutputFormat::Obj => grid
            .to_trimesh()
            .with_context(context)?
            .to_obj_file(&path)
            .with_context(context)?,
    }

    Ok(())
}
