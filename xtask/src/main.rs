use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Generate a demo project tree for exercising the catalog by hand
    Fixture {
        /// Where to create the tree
        #[arg(long, default_value = "demos/fixture")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Fixture { path } => generate_fixture(path)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn generate_fixture(path: PathBuf) -> Result<()> {
    fs::create_dir_all(path.join("icons"))?;
    fs::create_dir_all(path.join("src"))?;
    fs::create_dir_all(path.join("dist"))?;

    fs::write(path.join(".gitignore"), "dist\n")?;
    fs::write(
        path.join("icons/arrow-left.svg"),
        "<svg width=\"24\" height=\"24\"><path d=\"M20 12H4m0 0l6-6m-6 6l6 6\"/></svg>\n",
    )?;
    fs::write(
        path.join("icons/spinner.svg"),
        "<svg viewBox=\"0 0 50 50\"><circle cx=\"25\" cy=\"25\" r=\"20\" fill=\"none\" stroke-width=\"5\"/></svg>\n",
    )?;
    fs::write(
        path.join("src/MenuButton.tsx"),
        "export const MenuButton = (props) => (\n  <svg width={16} height={16} {...props}>\n    <path d=\"M2 4h12M2 8h12M2 12h12\"/>\n  </svg>\n);\n",
    )?;
    fs::write(
        path.join("src/badge.vue"),
        "<template>\n  <svg viewBox=\"0 0 8 8\"><circle cx=\"4\" cy=\"4\" r=\"3\"/></svg>\n</template>\n",
    )?;
    fs::write(
        path.join("dist/bundled.js"),
        "const hidden = '<svg viewBox=\"0 0 1 1\"/></svg>';\n",
    )?;

    println!("fixture tree written to {}", path.display());
    println!("try: cargo run -p svgscout -- {}", path.display());
    Ok(())
}
