//! kiln: build one Rust application for every release platform.

mod commands;
mod manifest;

use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use manifest::ProjectSettings;

#[derive(Parser)]
#[command(
    name = "kiln",
    version,
    about = "Cross-compile a Rust application for Linux and Windows and collect the binaries"
)]
struct Cli {
    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register build targets with rustup and install the cross linker (run once per host)
    Prepare,
    /// Build every built-in target in order and copy the binaries to the output directory
    ///
    /// The output directory is `[output].dir` from kiln.toml (default `dist`), resolved
    /// relative to the directory holding kiln.toml, not the working directory. Without
    /// a kiln.toml it is `dist` under the working directory.
    Build,
    /// List the built-in target platforms, or describe one
    Targets {
        /// Short name (e.g., "windows-x86_64") or triple of the target to describe
        name: Option<String>,
    },
    /// Check toolchain and project status
    Doctor,
    /// Remove the output directory
    Clean,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Prepare => commands::prepare::run(),

        Commands::Build => {
            let settings = ProjectSettings::resolve(&cwd)?;
            commands::build::run(&settings)
        }

        Commands::Targets { name } => {
            let project = ProjectSettings::resolve(&cwd).ok().map(|s| s.name);
            match name {
                Some(name) => commands::targets::describe(&name, project.as_deref()),
                None => commands::targets::list(project.as_deref()),
            }
        }

        Commands::Doctor => commands::doctor::run(&cwd),

        Commands::Clean => {
            let settings = ProjectSettings::resolve(&cwd)?;
            commands::clean::run(&settings.output_dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_help_names_the_output_anchor() {
        let cmd = Cli::command();
        let build = cmd.find_subcommand("build").unwrap();
        let help = build.get_long_about().unwrap().to_string();
        assert!(help.contains("relative to the directory holding kiln.toml"));
    }

    #[test]
    fn targets_takes_an_optional_name() {
        let cli = Cli::try_parse_from(["kiln", "targets", "windows-x86_64"]).unwrap();
        assert!(matches!(cli.command, Commands::Targets { name: Some(ref n) } if n == "windows-x86_64"));
        let cli = Cli::try_parse_from(["kiln", "targets"]).unwrap();
        assert!(matches!(cli.command, Commands::Targets { name: None }));
    }
}
