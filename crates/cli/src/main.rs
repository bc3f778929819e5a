use bushfire_core::grid::{render_fire_state, render_heatmap, write_real_grid};
use bushfire_core::{
    compare, load_bushfire, load_vegetation_density, load_vegetation_type, load_wind_speed,
    write_bushfire, NeighborExclusion, Result, RiskMatrix, SimulationConfig, SpreadMode,
    SpreadSimulation, TerrainLayers, TerrainReport,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Bushfire risk and spread over CSV terrain layers
#[derive(Parser, Debug)]
#[command(name = "bushfire")]
#[command(about = "Grid-based bushfire risk and spread", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the fire risk matrix for a terrain
    Risk(RiskArgs),
    /// Spread an initial fire over a terrain
    Simulate(SimulateArgs),
    /// Summarise vegetation and wind layers
    Report(ReportArgs),
}

/// The three terrain layer files
#[derive(Args, Debug)]
struct TerrainArgs {
    /// Vegetation type CSV
    #[arg(long)]
    vegetation_type: PathBuf,

    /// Vegetation density CSV (values in [0, 1])
    #[arg(long)]
    vegetation_density: PathBuf,

    /// Wind speed CSV
    #[arg(long)]
    wind_speed: PathBuf,
}

impl TerrainArgs {
    fn load(&self) -> Result<TerrainLayers> {
        TerrainLayers::load(
            &self.vegetation_type,
            &self.vegetation_density,
            &self.wind_speed,
        )
    }
}

#[derive(Args, Debug)]
struct RiskArgs {
    #[command(flatten)]
    terrain: TerrainArgs,

    /// Print the risk matrix as a shade map
    #[arg(long)]
    show: bool,

    /// Write the risk matrix as CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decimal places in the CSV output
    #[arg(long, default_value_t = 4)]
    precision: usize,
}

/// Neighbour eligibility for stochastic ignition
#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExclusionArg {
    /// Only diagonal neighbours can ignite
    Literal,
    /// Every neighbour except the source cell can ignite
    SourceOnly,
}

impl From<ExclusionArg> for NeighborExclusion {
    fn from(arg: ExclusionArg) -> Self {
        match arg {
            ExclusionArg::Literal => NeighborExclusion::SharedRowOrColumn,
            ExclusionArg::SourceOnly => NeighborExclusion::SourceCellOnly,
        }
    }
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    terrain: TerrainArgs,

    /// Initial fire state CSV (0 unburnt, 1 burning, empty non-burnable)
    #[arg(long)]
    bushfire: PathBuf,

    /// Number of timesteps (overrides the config file)
    #[arg(short, long)]
    steps: Option<u32>,

    /// Use risk-driven stochastic spread
    #[arg(long)]
    stochastic: bool,

    /// Seed for the ignition thresholds (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Neighbour exclusion for stochastic spread (overrides the config file)
    #[arg(long, value_enum)]
    exclusion: Option<ExclusionArg>,

    /// JSON run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the resulting fire state as CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reference fire state to score the result against
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Do not print the resulting grid
    #[arg(short, long)]
    quiet: bool,
}

impl SimulateArgs {
    /// Config file (or defaults) with command-line overrides applied
    fn config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if self.stochastic {
            config.mode = SpreadMode::Stochastic;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(exclusion) = self.exclusion {
            config.exclusion = exclusion.into();
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Vegetation type CSV
    #[arg(long)]
    vegetation_type: PathBuf,

    /// Vegetation density CSV
    #[arg(long)]
    vegetation_density: PathBuf,

    /// Wind speed CSV
    #[arg(long)]
    wind_speed: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Risk(args) => run_risk(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Report(args) => run_report(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_risk(args: &RiskArgs) -> Result<()> {
    let terrain = args.terrain.load()?;
    let matrix = RiskMatrix::from_terrain(&terrain);

    println!("=== Fire Risk ===");
    println!("Grid: {}x{}", terrain.rows(), terrain.cols());
    println!("Max risk: {:.4}", matrix.max_risk());
    println!("Mean risk: {:.4}", matrix.mean_risk());

    if args.show {
        println!();
        print!("{}", render_heatmap(matrix.grid(), matrix.max_risk()));
    }
    if let Some(path) = &args.output {
        write_real_grid(path, matrix.grid(), args.precision)?;
    }
    Ok(())
}

fn run_simulate(args: &SimulateArgs) -> Result<()> {
    let config = args.config()?;
    let terrain = args.terrain.load()?;
    let fire = load_bushfire(&args.bushfire)?;

    info!(
        "Simulating {} {:?} steps on a {}x{} grid",
        config.steps,
        config.mode,
        terrain.rows(),
        terrain.cols()
    );
    let mut sim = SpreadSimulation::from_config(fire, &terrain, &config)?;
    let stats = sim.run(config.steps, &mut config.rng());

    println!("=== Spread Result ===");
    println!("Steps: {}", stats.steps_run);
    println!("Burning cells: {}", stats.burning_cells);
    println!(
        "Ignitions: {} total, {} in the last step",
        stats.total_ignitions, stats.ignitions_last_step
    );
    if !args.quiet {
        println!();
        print!("{}", render_fire_state(sim.fire_state()));
    }

    if let Some(path) = &args.output {
        write_bushfire(path, sim.fire_state())?;
    }
    if let Some(path) = &args.reference {
        let reference = load_bushfire(path)?;
        let score = compare(&reference, sim.fire_state())?;
        println!("Agreement with reference: {:.2}%", score * 100.0);
    }
    Ok(())
}

fn run_report(args: &ReportArgs) -> Result<()> {
    let vegetation_type = load_vegetation_type(&args.vegetation_type)?;
    let vegetation_density = load_vegetation_density(&args.vegetation_density)?;
    let terrain = match &args.wind_speed {
        Some(path) => {
            TerrainLayers::new(vegetation_type, vegetation_density, load_wind_speed(path)?)?
        }
        None => TerrainLayers::calm(vegetation_type, vegetation_density)?,
    };
    let report = TerrainReport::from_terrain(&terrain);

    if args.json {
        println!("{}", report.to_json_pretty()?);
        return Ok(());
    }

    println!("=== Terrain Report ===");
    println!("Grid: {}x{}", report.rows, report.cols);
    println!("Blank vegetation cells: {}", report.blank_vegetation_cells);
    println!("\n{:<20} {:>8} {:>14}", "Vegetation", "Cells", "Area (m²)");
    for tally in &report.vegetation {
        println!(
            "{:<20} {:>8} {:>14.1}",
            tally.vegetation_type, tally.cells, tally.area_sq_m
        );
    }
    match report.highest_wind_speed {
        Some(speed) => println!("\nHighest wind speed: {speed:.2}"),
        None => println!("\nHighest wind speed: no readings"),
    }
    Ok(())
}
