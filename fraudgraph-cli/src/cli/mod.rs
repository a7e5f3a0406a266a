//! Command-line interface for synthesizing fraud networks.
//!
//! `generate` builds and labels a network, `augment` adds collusion edges to
//! a stored network, and `render` exports a coloured sample as Graphviz DOT.

mod commands;

pub use commands::{
    AugmentCommand, AugmentSummary, Cli, CliError, Command, ExecutionSummary, GenerateCommand,
    GenerateSummary, LabelArg, OutputFormat, RenderCommand, RenderSummary, render_summary,
    run_cli,
};

#[cfg(test)]
mod test_helpers;
