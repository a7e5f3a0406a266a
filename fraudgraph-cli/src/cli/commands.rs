//! Command implementations and argument parsing for the `fraudgraph` binary.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use fraudgraph_core::{
    CollusionReport, DEFAULT_MAX_ACCOMPLICE_EDGES, DEFAULT_NUM_NODES, DEFAULT_SEED,
    DEFAULT_TARGET_EDGES, DotRenderer, FraudGraphError, GraphSample, GraphSummary, LabelField,
    NodeSample, Role, RoleWeights, SampleRenderer, SynthesisBuilder, TopologyStats, summarize,
};
use fraudgraph_graphml::{GraphmlError, read_graphml_path, write_graphml_path};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_SAMPLE_SIZE: usize = 5;
const DEFAULT_SUBSET_SIZE: usize = 100;
const DEFAULT_GENERATED_PATH: &str = "synthetic_network.graphml";
const DEFAULT_ENHANCED_PATH: &str = "synthetic_network_with_true_states_enhanced.graphml";
const DEFAULT_DOT_PATH: &str = "synthetic_network_sample.dot";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fraudgraph",
    about = "Synthesize labelled transaction networks for fraud-detection research."
)]
pub struct Cli {
    /// Format of the summary printed to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    pub format: OutputFormat,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a labelled network and save it as GraphML.
    Generate(GenerateCommand),
    /// Add Fraud-to-Accomplice collusion edges to a saved network.
    Augment(AugmentCommand),
    /// Export the first nodes of a saved network as a coloured DOT graph.
    Render(RenderCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes in the network.
    #[arg(long, default_value_t = DEFAULT_NUM_NODES)]
    pub num_nodes: usize,

    /// Number of edges the topology is topped up to.
    #[arg(long, default_value_t = DEFAULT_TARGET_EDGES)]
    pub target_edges: usize,

    /// Belief prior copied onto every node, e.g. `Fraud=0.2,Accomplice=0.3,Honest=0.5`.
    #[arg(long, default_value_t = RoleWeights::uniform())]
    pub initial_belief: RoleWeights,

    /// Target distribution of ground-truth roles.
    #[arg(long, default_value_t = RoleWeights::default_state_distribution())]
    pub state_distribution: RoleWeights,

    /// Seed for every random draw.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of nodes listed in the summary.
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Destination GraphML file.
    #[arg(long, default_value = DEFAULT_GENERATED_PATH)]
    pub output: PathBuf,
}

/// Options accepted by the `augment` command.
#[derive(Debug, Args, Clone)]
pub struct AugmentCommand {
    /// Labelled GraphML network to augment.
    #[arg(long, default_value = DEFAULT_GENERATED_PATH)]
    pub input: PathBuf,

    /// Destination for the augmented network.
    #[arg(long, default_value = DEFAULT_ENHANCED_PATH)]
    pub output: PathBuf,

    /// Accomplices sampled per Fraud node.
    #[arg(long, default_value_t = DEFAULT_MAX_ACCOMPLICE_EDGES)]
    pub max_accomplice_edges: usize,

    /// Seed for accomplice sampling.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of nodes listed in the summary.
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,
}

/// Options accepted by the `render` command.
#[derive(Debug, Args, Clone)]
pub struct RenderCommand {
    /// GraphML network to sample.
    #[arg(long, default_value = DEFAULT_ENHANCED_PATH)]
    pub input: PathBuf,

    /// Destination DOT file.
    #[arg(long, default_value = DEFAULT_DOT_PATH)]
    pub output: PathBuf,

    /// Number of leading nodes included in the sample.
    #[arg(long, default_value_t = DEFAULT_SUBSET_SIZE)]
    pub subset_size: usize,

    /// Role attribute used to colour nodes.
    #[arg(long, value_enum, default_value_t = LabelArg::TrueState)]
    pub attribute: LabelArg,

    /// Title shown above the graph.
    #[arg(long)]
    pub title: Option<String>,
}

/// Role attribute selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LabelArg {
    /// Colour by ground truth.
    TrueState,
    /// Colour by the working hypothesis.
    State,
}

impl From<LabelArg> for LabelField {
    fn from(value: LabelArg) -> Self {
        match value {
            LabelArg::TrueState => Self::TrueState,
            LabelArg::State => Self::State,
        }
    }
}

/// Output format for command summaries.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text lines.
    #[default]
    Human,
    /// A single pretty-printed JSON document.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing an output file failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Loading or saving GraphML failed.
    #[error(transparent)]
    Graphml(#[from] GraphmlError),
    /// Configuration or synthesis failed.
    #[error(transparent)]
    Core(#[from] FraudGraphError),
}

/// Outcome of the `generate` command.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    /// File the network was written to.
    pub output: PathBuf,
    /// Seed used for every random draw.
    pub seed: u64,
    /// How the topology stage assembled the edges.
    pub topology: TopologyStats,
    /// Totals, distributions, and sample nodes of the saved network.
    pub graph: GraphSummary,
}

/// Outcome of the `augment` command.
#[derive(Debug, Clone, Serialize)]
pub struct AugmentSummary {
    /// File the network was loaded from.
    pub input: PathBuf,
    /// File the augmented network was written to.
    pub output: PathBuf,
    /// Edge count before augmentation.
    pub edges_before: usize,
    /// Collusion edges added and skipped.
    pub collusion: CollusionReport,
    /// Totals, distributions, and sample nodes of the augmented network.
    pub graph: GraphSummary,
}

/// Outcome of the `render` command.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    /// File the network was loaded from.
    pub input: PathBuf,
    /// DOT file written.
    pub output: PathBuf,
    /// Attribute used for colouring.
    pub field: LabelField,
    /// Nodes in the rendered sample.
    pub nodes: usize,
    /// Edges in the rendered sample.
    pub edges: usize,
    /// Title embedded in the DOT document.
    pub title: String,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ExecutionSummary {
    /// A network was generated.
    Generate(GenerateSummary),
    /// A network was augmented.
    Augment(AugmentSummary),
    /// A sample was rendered.
    Render(RenderSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when configuration is invalid, a file cannot be
/// read or written, or a pipeline stage fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use fraudgraph_cli::cli::{Cli, Command, ExecutionSummary, GenerateCommand, OutputFormat, run_cli};
/// # use fraudgraph_core::RoleWeights;
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     format: OutputFormat::Human,
///     command: Command::Generate(GenerateCommand {
///         num_nodes: 50,
///         target_edges: 120,
///         initial_belief: RoleWeights::uniform(),
///         state_distribution: RoleWeights::default_state_distribution(),
///         seed: 7,
///         sample_size: 3,
///         output: dir.path().join("network.graphml"),
///     }),
/// };
/// let ExecutionSummary::Generate(summary) = run_cli(cli)? else {
///     panic!("generate returns a generate summary");
/// };
/// assert_eq!(summary.graph.node_count, 50);
/// assert!(summary.output.exists());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(command).map(ExecutionSummary::Generate)
        }
        Command::Augment(command) => {
            span.record("command", field::display("augment"));
            run_augment(command).map(ExecutionSummary::Augment)
        }
        Command::Render(command) => {
            span.record("command", field::display("render"));
            run_render(command).map(ExecutionSummary::Render)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(
        num_nodes = command.num_nodes,
        target_edges = command.target_edges,
        seed = command.seed,
        output = %command.output.display(),
    ),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<GenerateSummary, CliError> {
    let synthesizer = SynthesisBuilder::new()
        .with_num_nodes(command.num_nodes)
        .with_target_edges(command.target_edges)
        .with_initial_belief(command.initial_belief)
        .with_state_distribution(command.state_distribution)
        .with_seed(command.seed)
        .build()?;
    let synthesis = synthesizer.generate()?;
    write_graphml_path(&synthesis.graph, &command.output)?;

    let graph = summarize(&synthesis.graph, command.sample_size);
    info!(
        nodes = graph.node_count,
        edges = graph.edge_count,
        output = %command.output.display(),
        "network generated"
    );
    Ok(GenerateSummary {
        output: command.output,
        seed: command.seed,
        topology: synthesis.topology,
        graph,
    })
}

#[instrument(
    name = "cli.augment",
    err,
    skip(command),
    fields(
        input = %command.input.display(),
        output = %command.output.display(),
        max_accomplice_edges = command.max_accomplice_edges,
    ),
)]
pub(super) fn run_augment(command: AugmentCommand) -> Result<AugmentSummary, CliError> {
    let synthesizer = SynthesisBuilder::new()
        .with_max_accomplice_edges(command.max_accomplice_edges)
        .with_seed(command.seed)
        .build()?;
    let mut network = read_graphml_path(&command.input)?;
    let edges_before = network.edge_count();
    let collusion = synthesizer.augment(&mut network, &mut synthesizer.rng())?;
    write_graphml_path(&network, &command.output)?;

    info!(
        edges_added = collusion.edges_added,
        output = %command.output.display(),
        "network augmented"
    );
    Ok(AugmentSummary {
        input: command.input,
        output: command.output,
        edges_before,
        collusion,
        graph: summarize(&network, command.sample_size),
    })
}

#[instrument(
    name = "cli.render",
    err,
    skip(command),
    fields(
        input = %command.input.display(),
        output = %command.output.display(),
        subset_size = command.subset_size,
        field = field::Empty,
    ),
)]
pub(super) fn run_render(command: RenderCommand) -> Result<RenderSummary, CliError> {
    let label_field = LabelField::from(command.attribute);
    Span::current().record("field", label_field.attribute_name());

    let network = read_graphml_path(&command.input)?;
    let sample = GraphSample::first_nodes(&network, command.subset_size)?;
    let renderer = match command.title {
        Some(title) => DotRenderer::new(label_field).with_title(title),
        None => DotRenderer::new(label_field),
    };
    write_dot(&renderer, &sample, &command.output)?;

    info!(
        nodes = sample.graph().node_count(),
        edges = sample.graph().edge_count(),
        "sample rendered"
    );
    Ok(RenderSummary {
        input: command.input,
        output: command.output,
        field: label_field,
        nodes: sample.graph().node_count(),
        edges: sample.graph().edge_count(),
        title: renderer.title().to_owned(),
    })
}

#[instrument(name = "cli.write_dot", err, skip(renderer, sample), fields(path = %path.display()))]
pub(super) fn write_dot(
    renderer: &dyn SampleRenderer,
    sample: &GraphSample,
    path: &Path,
) -> Result<(), CliError> {
    let io_error = |source: io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    renderer.render(sample, &mut writer).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

/// Renders `summary` to `writer` in the requested `format`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use fraudgraph_cli::cli::{ExecutionSummary, OutputFormat, RenderSummary, render_summary};
/// # use fraudgraph_core::LabelField;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Render(RenderSummary {
///     input: "in.graphml".into(),
///     output: "out.dot".into(),
///     field: LabelField::State,
///     nodes: 100,
///     edges: 240,
///     title: "Sample".into(),
/// });
/// let mut buffer = Vec::new();
/// render_summary(&summary, OutputFormat::Human, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "Rendered 100 nodes and 240 edges coloured by state to out.dot\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(
    summary: &ExecutionSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut writer, summary)?;
        return writeln!(writer);
    }

    match summary {
        ExecutionSummary::Generate(generate) => {
            write_graph_summary(&generate.graph, &mut writer)?;
            writeln!(
                writer,
                "Synthetic graph saved to {}",
                generate.output.display()
            )
        }
        ExecutionSummary::Augment(augment) => {
            writeln!(
                writer,
                "Added {} collusion edges ({} already present) between {} Fraud and {} Accomplice nodes; {} -> {} edges.",
                augment.collusion.edges_added,
                augment.collusion.already_present,
                augment.collusion.fraud_nodes,
                augment.collusion.accomplice_nodes,
                augment.edges_before,
                augment.graph.edge_count,
            )?;
            write_graph_summary(&augment.graph, &mut writer)?;
            writeln!(
                writer,
                "Enhanced graph saved to {}",
                augment.output.display()
            )
        }
        ExecutionSummary::Render(render) => writeln!(
            writer,
            "Rendered {} nodes and {} edges coloured by {} to {}",
            render.nodes,
            render.edges,
            render.field.attribute_name(),
            render.output.display()
        ),
    }
}

fn write_graph_summary(summary: &GraphSummary, writer: &mut impl Write) -> io::Result<()> {
    match summary.true_state.target {
        Some(target) => writeln!(writer, "Target distribution: {target}")?,
        None => writeln!(writer, "Target distribution: unknown")?,
    }
    write!(writer, "Generated distribution: {{")?;
    for (position, role) in Role::ALL.iter().enumerate() {
        let separator = if position == 0 { "" } else { ", " };
        write!(
            writer,
            "{separator}'{role}': {:.2}%",
            summary.true_state.percentage(*role)
        )?;
    }
    writeln!(writer, "}}")?;
    writeln!(writer, "Average degree: {:.2}", summary.average_degree)?;
    match summary.target_edges {
        Some(target) => writeln!(
            writer,
            "Graph has {} nodes and {} edges (target: {target} edges).",
            summary.node_count, summary.edge_count
        )?,
        None => writeln!(
            writer,
            "Graph has {} nodes and {} edges.",
            summary.node_count, summary.edge_count
        )?,
    }
    writeln!(
        writer,
        "Example node data (first {} nodes):",
        summary.samples.len()
    )?;
    for sample in &summary.samples {
        write_sample(sample, writer)?;
    }
    Ok(())
}

fn write_sample(sample: &NodeSample, writer: &mut impl Write) -> io::Result<()> {
    match &sample.labels {
        Some(labels) => writeln!(
            writer,
            "Node {}: {{'true_state': '{}', 'belief': {}, 'state': '{}'}}",
            sample.name, labels.true_state, labels.belief, labels.state
        ),
        None => writeln!(writer, "Node {}: {{}}", sample.name),
    }
}
