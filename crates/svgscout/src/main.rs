use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use svgscout::app::catalog::CatalogBuilder;
use svgscout::app::export::{ExportFormat, ExportOptions, Exporter};
use svgscout::domain::errors::ScanError;
use svgscout::infra::config::Config;
use svgscout::infra::workspace::{LocalWorkspace, WorkspaceResolver};
use svgscout::ui::app::UiApp;

/// Scan a project tree for SVG markup and browse it as a searchable catalog.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Project root to scan (defaults to the enclosing git work tree).
    root: Option<PathBuf>,

    /// Render the catalog to a file instead of opening the TUI.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Export format.
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,

    /// Preview theme override.
    #[arg(long)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions.
    Completions { shell: Shell },
}

fn main() -> ExitCode {
    svgscout::init();
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let result = match cli.export {
        Some(output) => run_export(cli.root, output, cli.format),
        None => UiApp::new(cli.root, cli.theme).run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(scan_err) = err.downcast_ref::<ScanError>() {
                eprintln!("{scan_err}");
            } else {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run_export(
    root: Option<PathBuf>,
    output: PathBuf,
    format: Option<ExportFormat>,
) -> anyhow::Result<()> {
    let workspace = LocalWorkspace::new(root, None);
    let root = workspace.root();

    let config = Config::load(root.as_deref())?;
    let catalog = CatalogBuilder::new(&config).scan(root.as_deref())?;

    let mut options = ExportOptions::from_config(&config);
    if let Some(format) = format {
        options.format = format;
    }
    options.output_path = Some(output);

    let exported = Exporter::new()?.export(&catalog, &options)?;
    if let Some(path) = exported.output_path {
        println!("exported {} fragments to {}", catalog.len(), path.display());
    }
    Ok(())
}
