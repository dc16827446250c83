use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use ocn_core::{Cost, DEFAULT_LINK_COST};
use ocn_graph::Network;
use ocn_topology::{ReportFormat, Site, TopologyConfig, TopologyError, TopologyKind};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ocn")]
#[command(version)]
#[command(about = "Compute all shortest paths for an on-chip network", long_about = None)]
struct Cli {
    /// What to print about the built network
    #[arg(short, long, value_enum, default_value_t = Format::Paths, global = true)]
    format: Format,

    /// Cost of every generated link (ignored for imported files)
    #[arg(long, default_value_t = DEFAULT_LINK_COST, global = true)]
    link_cost: Cost,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    topology: Topology,
}

#[derive(Subcommand)]
enum Topology {
    /// A regular mesh
    Mesh { width: usize, height: usize },
    /// A mesh with each row offset by one column
    Dmesh { width: usize, height: usize },
    /// Concentrated mesh: several endpoints per router
    Cmesh {
        width: usize,
        height: usize,
        nodes: usize,
    },
    /// A full crossbar
    Crossbar { nodes: usize },
    /// Mesh of crossbars
    Crossmesh {
        width: usize,
        height: usize,
        nodes: usize,
    },
    /// Import an edge list ("SRC" PORT -> "DST" PORT: COST per line)
    File { path: PathBuf },
    /// Build from a YAML or JSON topology description
    Config { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Cheapest cost for every reachable pair
    Paths,
    /// Direct links with port numbers
    Neighbors,
    /// Bare node names
    Nodes,
    /// Grid position of each mesh router
    Grid,
    /// Graphviz digraph
    Dot,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Paths => ReportFormat::Paths,
            Format::Neighbors => ReportFormat::Neighbors,
            Format::Nodes => ReportFormat::Nodes,
            Format::Grid => ReportFormat::Grid,
            Format::Dot => ReportFormat::Dot,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "ocn failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so the report on stdout stays clean.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn topology_config(cli: &Cli) -> CliResult<TopologyConfig> {
    let kind = match &cli.topology {
        Topology::Mesh { width, height } => TopologyKind::Mesh {
            width: *width,
            height: *height,
        },
        Topology::Dmesh { width, height } => TopologyKind::OffsetMesh {
            width: *width,
            height: *height,
        },
        Topology::Cmesh {
            width,
            height,
            nodes,
        } => TopologyKind::ConcentratedMesh {
            width: *width,
            height: *height,
            concentration: *nodes,
        },
        Topology::Crossbar { nodes } => TopologyKind::Crossbar { count: *nodes },
        Topology::Crossmesh {
            width,
            height,
            nodes,
        } => TopologyKind::Crossmesh {
            width: *width,
            height: *height,
            count: *nodes,
        },
        Topology::File { path } => TopologyKind::File { path: path.clone() },
        Topology::Config { path } => return Ok(ocn_topology::load_config(path)?),
    };
    Ok(TopologyConfig::new(kind).with_link_cost(cli.link_cost))
}

fn build(cli: &Cli) -> CliResult<Network<Site>> {
    let config = topology_config(cli)?;
    let network = config.build()?;
    debug!(kind = ?config.kind, nodes = network.len(), "built network");
    Ok(network)
}

fn run(cli: &Cli, out: &mut dyn Write) -> CliResult<()> {
    let mut network = build(cli)?;
    ocn_topology::render(&mut network, cli.format.into(), out)?;
    out.flush()?;
    Ok(())
}
