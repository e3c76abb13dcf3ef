//! CLI commands for centra

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use centra::convert;
use centra::experiment::{self, RunRecord};
use centra::snapshot::GraphSnapshot;
use centra_engine::diameter::{approx_diameter, exact_diameter};
use centra_engine::{
    exact_betweenness, run_with_deadline, sampled_betweenness, ComputationStats, DiameterSpec,
    EstimatorKind, Graph, Outcome, SampleOptions,
};

#[derive(Parser)]
#[command(name = "centra")]
#[command(about = "Exact and sampling-based betweenness centrality estimation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (use multiple times for more verbosity)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EstimatorArg {
    /// Uniform source sampling with full accumulation
    BrandesPich,
    /// Vertex-pair sampling with one random shortest path per pair
    Vc,
    /// Uniform source sampling with linear distance scaling
    Gss,
}

impl From<EstimatorArg> for EstimatorKind {
    fn from(arg: EstimatorArg) -> Self {
        match arg {
            EstimatorArg::BrandesPich => EstimatorKind::BrandesPich,
            EstimatorArg::Vc => EstimatorKind::VcDimension,
            EstimatorArg::Gss => EstimatorKind::GssLinear,
        }
    }
}

/// What an experiment runs repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    Exact,
    BrandesPich,
    Vc,
    Gss,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an edge-list text file into a graph snapshot
    Convert {
        /// Input edge list: one 'from to' pair per line, '#' comments
        input: PathBuf,

        /// Output snapshot file
        output: PathBuf,

        /// Treat the edge list as directed (undirected by default)
        #[arg(short, long)]
        directed: bool,
    },

    /// Compute exact betweenness centrality (Brandes' algorithm)
    Exact {
        /// Graph snapshot produced by `convert`
        graph: PathBuf,

        /// Output JSON file for stats and betweenness values
        output: PathBuf,

        /// Deadline in seconds, 0 = no deadline
        #[arg(short = 't', long, default_value_t = 3600)]
        timeout: u64,
    },

    /// Estimate betweenness centrality by random sampling
    Sample {
        /// Accuracy parameter, in (0, 1)
        #[arg(value_parser = parse_unit_interval)]
        epsilon: f64,

        /// Confidence parameter, in (0, 1)
        #[arg(value_parser = parse_unit_interval)]
        delta: f64,

        /// Graph snapshot produced by `convert`
        graph: PathBuf,

        /// Output JSON file for stats and betweenness values
        output: PathBuf,

        /// Estimator to run
        #[arg(short, long, value_enum, default_value = "brandes-pich")]
        estimator: EstimatorArg,

        /// Fixed sample size, overriding epsilon/delta (and the diameter)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        sample_size: Option<u64>,

        /// Fixed diameter for the VC sample-size bound
        #[arg(short = 'd', long, conflicts_with = "exact_diameter")]
        diameter: Option<u64>,

        /// Compute the exact diameter instead of the one-sweep bound
        #[arg(long)]
        exact_diameter: bool,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Deadline in seconds, 0 = no deadline
        #[arg(short = 't', long, default_value_t = 3600)]
        timeout: u64,
    },

    /// Compute the graph diameter
    Diameter {
        /// Graph snapshot produced by `convert`
        graph: PathBuf,

        /// One-sweep upper bound instead of the exact diameter
        #[arg(short, long)]
        approximate: bool,

        /// RNG seed for the approximate sweep
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run an estimator repeatedly and aggregate stats across runs
    Experiment {
        /// Number of runs
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        runs: u32,

        /// Graph snapshot produced by `convert`
        graph: PathBuf,

        /// Output JSON file for the aggregate and every run
        output: PathBuf,

        /// Computation to repeat
        #[arg(short, long, value_enum, default_value = "exact")]
        estimator: TargetArg,

        /// Accuracy parameter, required for sampling estimators unless
        /// --sample-size is given
        #[arg(long, value_parser = parse_unit_interval)]
        epsilon: Option<f64>,

        /// Confidence parameter, required for sampling estimators unless
        /// --sample-size is given
        #[arg(long, value_parser = parse_unit_interval)]
        delta: Option<f64>,

        /// Fixed sample size, overriding epsilon/delta
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        sample_size: Option<u64>,

        /// Fixed diameter for the VC sample-size bound
        #[arg(short = 'd', long, conflicts_with = "exact_diameter")]
        diameter: Option<u64>,

        /// Compute the exact diameter instead of the one-sweep bound
        #[arg(long)]
        exact_diameter: bool,

        /// Base RNG seed; run i uses seed + i
        #[arg(long)]
        seed: Option<u64>,

        /// Per-run deadline in seconds, 0 = no deadline
        #[arg(short = 't', long, default_value_t = 3600)]
        timeout: u64,
    },
}

fn parse_unit_interval(value: &str) -> std::result::Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("{value} is not a valid float"))?;
    if parsed <= 0.0 || parsed >= 1.0 {
        return Err(format!(
            "{value} is not between 0 and 1 (extremes excluded)"
        ));
    }
    Ok(parsed)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            directed,
        } => run_convert(&input, &output, directed),
        Commands::Exact {
            graph,
            output,
            timeout,
        } => run_exact(&graph, &output, timeout),
        Commands::Sample {
            epsilon,
            delta,
            graph,
            output,
            estimator,
            sample_size,
            diameter,
            exact_diameter,
            seed,
            timeout,
        } => {
            let options = SampleOptions {
                sample_size,
                diameter: diameter_spec(diameter, exact_diameter),
                seed,
                ..SampleOptions::new(estimator.into(), epsilon, delta)
            };
            run_sample(&graph, &output, &options, timeout)
        }
        Commands::Diameter {
            graph,
            approximate,
            seed,
        } => run_diameter(&graph, approximate, seed),
        Commands::Experiment {
            runs,
            graph,
            output,
            estimator,
            epsilon,
            delta,
            sample_size,
            diameter,
            exact_diameter,
            seed,
            timeout,
        } => run_experiment(ExperimentConfig {
            runs,
            graph,
            output,
            estimator,
            epsilon,
            delta,
            sample_size,
            diameter: diameter_spec(diameter, exact_diameter),
            seed,
            timeout,
        }),
    }
}

fn diameter_spec(fixed: Option<u64>, exact: bool) -> DiameterSpec {
    match fixed {
        Some(value) => DiameterSpec::Fixed(value),
        None if exact => DiameterSpec::Exact,
        None => DiameterSpec::Approximate,
    }
}

fn load_graph(path: &Path) -> Result<(GraphSnapshot, Graph)> {
    let snapshot = GraphSnapshot::load(path)?;
    let graph = snapshot.to_graph()?;
    info!(
        "loaded graph: {} vertices, {} edges, {}",
        graph.vertex_count(),
        graph.edge_count(),
        if graph.is_directed() {
            "directed"
        } else {
            "undirected"
        }
    );
    Ok((snapshot, graph))
}

/// Stats plus betweenness, keyed back to the original vertex names.
#[derive(Serialize)]
struct ResultsFile<'a> {
    stats: &'a ComputationStats,
    vertex_names: &'a [String],
    betweenness: &'a [f64],
}

fn write_results(
    path: &Path,
    vertex_names: &[String],
    stats: &ComputationStats,
    betweenness: &[f64],
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create results file {}", path.display()))?;
    serde_json::to_writer_pretty(
        file,
        &ResultsFile {
            stats,
            vertex_names,
            betweenness,
        },
    )
    .context("failed to write results")?;
    info!("wrote results to {}", path.display());
    Ok(())
}

fn run_convert(input: &Path, output: &Path, directed: bool) -> Result<()> {
    let edge_list = convert::read_edge_list(input)?;
    let graph = edge_list.to_graph(directed)?;
    let snapshot = GraphSnapshot::from_graph(&graph, edge_list.vertex_names);
    snapshot.save(output)?;
    info!("wrote snapshot to {}", output.display());
    Ok(())
}

fn run_exact(graph_path: &Path, output: &Path, timeout: u64) -> Result<()> {
    let (snapshot, graph) = load_graph(graph_path)?;
    let vertex_count = graph.vertex_count();

    let (stats, betweenness) = match run_with_deadline(timeout, move || exact_betweenness(&graph))
    {
        Outcome::Completed(result) => result?,
        Outcome::Expired => {
            warn!("exact betweenness timed out after {timeout}s");
            (ComputationStats::expired(timeout, None), vec![0.0; vertex_count])
        }
    };

    info!("exact betweenness computed in {:.3}s", stats.time);
    write_results(output, &snapshot.vertex_names, &stats, &betweenness)
}

fn run_sample(
    graph_path: &Path,
    output: &Path,
    options: &SampleOptions,
    timeout: u64,
) -> Result<()> {
    let (snapshot, graph) = load_graph(graph_path)?;
    let vertex_count = graph.vertex_count();

    let worker_options = options.clone();
    let outcome =
        run_with_deadline(timeout, move || sampled_betweenness(&graph, &worker_options));
    let (stats, betweenness) = match outcome {
        Outcome::Completed(result) => result?,
        Outcome::Expired => {
            warn!("sampled betweenness timed out after {timeout}s");
            (
                ComputationStats::expired(timeout, options.sample_size),
                vec![0.0; vertex_count],
            )
        }
    };

    if let Some(k) = stats.sample_size {
        info!("estimate from {k} samples in {:.3}s", stats.time);
    }
    write_results(output, &snapshot.vertex_names, &stats, &betweenness)
}

fn run_diameter(graph_path: &Path, approximate: bool, seed: Option<u64>) -> Result<()> {
    let (_, graph) = load_graph(graph_path)?;
    let start = std::time::Instant::now();
    let result = if approximate {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        approx_diameter(&graph, &mut rng)?
    } else {
        exact_diameter(&graph)
    };
    let elapsed = start.elapsed().as_secs_f64();

    println!(
        "{}, diameter={}, touched_edges={}, time={elapsed:.6}",
        graph_path.display(),
        result.diameter,
        result.touched_edges
    );
    Ok(())
}

struct ExperimentConfig {
    runs: u32,
    graph: PathBuf,
    output: PathBuf,
    estimator: TargetArg,
    epsilon: Option<f64>,
    delta: Option<f64>,
    sample_size: Option<u64>,
    diameter: DiameterSpec,
    seed: Option<u64>,
    timeout: u64,
}

#[derive(Serialize)]
struct ExperimentFile<'a> {
    aggregate: &'a experiment::Aggregate,
    vertex_names: &'a [String],
    runs: &'a [RunRecord],
}

fn run_experiment(config: ExperimentConfig) -> Result<()> {
    let (snapshot, graph) = load_graph(&config.graph)?;
    let vertex_count = graph.vertex_count();

    let sampled_kind = match config.estimator {
        TargetArg::Exact => None,
        TargetArg::BrandesPich => Some(EstimatorKind::BrandesPich),
        TargetArg::Vc => Some(EstimatorKind::VcDimension),
        TargetArg::Gss => Some(EstimatorKind::GssLinear),
    };
    if sampled_kind.is_some() && config.sample_size.is_none() {
        if config.epsilon.is_none() || config.delta.is_none() {
            bail!("--epsilon and --delta are required unless --sample-size is given");
        }
    }

    let mut records = Vec::with_capacity(config.runs as usize);
    for run_index in 0..config.runs {
        info!("run #{run_index}");
        let worker_graph = graph.clone();
        let record = match sampled_kind {
            None => {
                match run_with_deadline(config.timeout, move || exact_betweenness(&worker_graph))
                {
                    Outcome::Completed(result) => {
                        let (stats, betweenness) = result?;
                        RunRecord { stats, betweenness }
                    }
                    Outcome::Expired => RunRecord {
                        stats: ComputationStats::expired(config.timeout, None),
                        betweenness: vec![0.0; vertex_count],
                    },
                }
            }
            Some(kind) => {
                let options = SampleOptions {
                    sample_size: config.sample_size,
                    diameter: config.diameter,
                    seed: config.seed.map(|base| base + run_index as u64),
                    ..SampleOptions::new(
                        kind,
                        config.epsilon.unwrap_or(0.1),
                        config.delta.unwrap_or(0.1),
                    )
                };
                let outcome = run_with_deadline(config.timeout, move || {
                    sampled_betweenness(&worker_graph, &options)
                });
                match outcome {
                    Outcome::Completed(result) => {
                        let (stats, betweenness) = result?;
                        RunRecord { stats, betweenness }
                    }
                    Outcome::Expired => RunRecord {
                        stats: ComputationStats::expired(config.timeout, config.sample_size),
                        betweenness: vec![0.0; vertex_count],
                    },
                }
            }
        };
        records.push(record);
    }

    let aggregate = experiment::aggregate(&records)?;
    let graph_name = config
        .graph
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.graph.display().to_string());
    let (header, row) = experiment::csv(&aggregate, &graph_name, config.epsilon, config.delta);
    println!("{header}");
    println!("{row}");

    let file = std::fs::File::create(&config.output)
        .with_context(|| format!("failed to create output {}", config.output.display()))?;
    serde_json::to_writer_pretty(
        file,
        &ExperimentFile {
            aggregate: &aggregate,
            vertex_names: &snapshot.vertex_names,
            runs: &records,
        },
    )
    .context("failed to write experiment results")?;
    info!("wrote experiment results to {}", config.output.display());
    Ok(())
}
