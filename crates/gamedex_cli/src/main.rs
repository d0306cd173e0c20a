//! Gamedex CLI - maintenance tool for the open source games catalog.

mod commands;
mod config;
mod progress;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::commands::shared::OutputFormat;

#[derive(Parser)]
#[command(name = "gamedex")]
#[command(version)]
#[command(about = "Maintenance tool for a markdown catalog of open source games")]
#[command(
    long_about = "Gamedex keeps a catalog of open source games in shape. Each game is a \
markdown entry inside a category directory; gamedex regenerates the category tables of \
contents, the README summary, the statistics page and the JSON export from them, checks \
entries for missing or invalid fields, and verifies their external links."
)]
#[command(after_long_help = r#"EXAMPLES
    Regenerate every derived file:
        $ gamedex maintain

    Work on a catalog checked out elsewhere:
        $ gamedex --root ~/src/open-source-games maintain

    List entry issues as JSON:
        $ gamedex lint --output json

    Check external links with fewer parallel requests:
        $ gamedex links --concurrency 2 --timeout 30

    Generate shell completions:
        $ gamedex completions bash > ~/.local/share/bash-completion/completions/gamedex

CONFIGURATION
    Gamedex reads configuration from:
      1. ~/.config/gamedex/config.toml (or $XDG_CONFIG_HOME/gamedex/config.toml)
      2. ./gamedex.toml
      3. Environment variables (GAMEDEX_* prefix, e.g., GAMEDEX_LINKS__CONCURRENCY)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    GAMEDEX_CATALOG__ROOT          Catalog root directory (default: .)
    GAMEDEX_LINKS__CONCURRENCY     Parallel link checks (default: 8)
    GAMEDEX_LINKS__TIMEOUT_SECS    Per-request timeout (default: 15)
    RUST_LOG                       Log filter for non-interactive output
"#)]
struct Cli {
    /// Catalog root directory (default from config or the current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the category summary in the README
    Readme,
    /// Regenerate the table of contents of every category
    Toc,
    /// Write the statistics page
    Stats,
    /// Write the JSON export of names and downloads
    Export,
    /// Run readme, toc, stats and export in one go
    Maintain,
    /// Report entries with missing or invalid fields
    Lint {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Report template lines left in entries
    Template {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Check the external links of every entry
    Links {
        /// Maximum concurrent requests (default from config or 8)
        #[arg(short = 'c', long)]
        concurrency: Option<usize>,

        /// Per-request timeout in seconds (default from config or 15)
        #[arg(short = 't', long)]
        timeout: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging only when not connected to a TTY
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("gamedex=info,gamedex_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::Completions { shell } => {
            return commands::meta::handle_completions(*shell);
        }
        Commands::Man { output } => {
            return commands::meta::handle_man(output.clone());
        }
        _ => {}
    }

    // Config file -> env vars -> defaults, then --root on top
    let config = config::Config::load();
    let layout = config.layout(cli.root);

    match cli.command {
        Commands::Readme => commands::maintain::handle_readme(layout)?,
        Commands::Toc => commands::maintain::handle_toc(layout)?,
        Commands::Stats => commands::maintain::handle_stats(layout)?,
        Commands::Export => commands::maintain::handle_export(layout)?,
        Commands::Maintain => commands::maintain::handle_maintain(layout)?,
        Commands::Lint { output } => commands::report::handle_lint(layout, output)?,
        Commands::Template { output } => commands::report::handle_template(layout, output)?,
        Commands::Links {
            concurrency,
            timeout,
        } => {
            shutdown::setup_shutdown_handler();
            commands::links::handle_links(layout, &config, concurrency, timeout).await?;
        }
        Commands::Completions { .. } | Commands::Man { .. } => {
            unreachable!("handled above")
        }
    }

    Ok(())
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
    fn root_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["gamedex", "toc", "--root", "/srv/games"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/srv/games")));
        assert!(matches!(cli.command, Commands::Toc));
    }

    #[test]
    fn links_flags_parse() {
        let cli =
            Cli::try_parse_from(["gamedex", "links", "--concurrency", "3", "-t", "20"]).unwrap();
        match cli.command {
            Commands::Links {
                concurrency,
                timeout,
            } => {
                assert_eq!(concurrency, Some(3));
                assert_eq!(timeout, Some(20));
            }
            _ => panic!("expected links command"),
        }
    }

    #[test]
    fn lint_output_defaults_to_table() {
        let cli = Cli::try_parse_from(["gamedex", "lint"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Lint {
                output: OutputFormat::Table
            }
        ));
    }
}
