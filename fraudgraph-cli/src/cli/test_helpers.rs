//! Small helpers shared across CLI tests.
//!
//! Commands read and write real files, so each test works inside its own
//! temporary directory.

use std::path::PathBuf;

use fraudgraph_core::{DEFAULT_SEED, RoleWeights};
use tempfile::TempDir;

use super::{AugmentCommand, Cli, CliError, GenerateCommand, LabelArg, RenderCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn generate_command(dir: &TempDir, num_nodes: usize, target_edges: usize) -> GenerateCommand {
    GenerateCommand {
        num_nodes,
        target_edges,
        initial_belief: RoleWeights::uniform(),
        state_distribution: RoleWeights::default_state_distribution(),
        seed: DEFAULT_SEED,
        sample_size: 5,
        output: dir.path().join("network.graphml"),
    }
}

pub(super) fn augment_command(input: PathBuf, dir: &TempDir, max_accomplice_edges: usize) -> AugmentCommand {
    AugmentCommand {
        input,
        output: dir.path().join("enhanced.graphml"),
        max_accomplice_edges,
        seed: DEFAULT_SEED,
        sample_size: 5,
    }
}

pub(super) fn render_command(input: PathBuf, dir: &TempDir, subset_size: usize) -> RenderCommand {
    RenderCommand {
        input,
        output: dir.path().join("sample.dot"),
        subset_size,
        attribute: LabelArg::TrueState,
        title: None,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
