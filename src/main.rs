use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use otuprune::prune_tree_file;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: otuprune <input_tree_file> <input_map_file> <output_tree_file>";

/// Prune a taxid-labelled Newick reference tree to the taxa of a mapping
/// table and relabel its leaves with OTU labels
#[derive(Parser, Debug)]
#[command(
    name = "otuprune",
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Newick reference tree with taxids as leaf labels
    input_tree_file: PathBuf,

    /// Mapping table with columns `tax_id` and `emOTU` (comma-separated, or tab-separated for .tsv/.tab)
    input_map_file: PathBuf,

    /// Where to write the pruned and relabelled Newick tree
    output_tree_file: PathBuf,
}

fn main() -> ExitCode {
    // Exactly three positional arguments, anything else gets the usage line
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    setup_logger(LevelFilter::Info)?;

    prune_tree_file(
        &cli.input_tree_file,
        &cli.input_map_file,
        &cli.output_tree_file,
    )
    .context("Could not produce OTU tree")?;

    println!(
        "Filtered and renamed tree saved to '{}' in Newick format.",
        cli.output_tree_file.display()
    );
    Ok(())
}

/// Routes `log` records to stderr as `[LEVEL target] message`.
fn setup_logger(level: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("Failed to set up logging")
}
