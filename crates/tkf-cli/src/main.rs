//! `tkforge`: command line front end for TkForge backups.
//!
//! Reads `.tkf` backups, writes runnable tkinter programs, and reports
//! what the model and the linter think of a design.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use tkf_core::{Design, EmitConfig, LintSeverity, emit_export, lint_design, list_kinds, load_backup};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "tkforge.toml";

#[derive(Parser, Debug)]
#[command(name = "tkforge", version, about = "Tk layout designs to Python programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the widget kinds a design can contain.
    Kinds,
    /// Generate a runnable Python program from a backup.
    Export {
        backup: PathBuf,
        /// Write the program here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export settings (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load and lint a backup.
    Check { backup: PathBuf },
    /// Print the widget tree of a backup.
    Tree {
        backup: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Kinds => {
            for kind in list_kinds() {
                println!("{:<12} {}", kind.class_name(), kind.namespace().module_alias());
            }
        }
        Command::Export {
            backup,
            output,
            config,
        } => {
            let design = read_design(&backup)?;
            let config = read_config(config.as_deref())?;
            let program = emit_export(&design, &config);
            match output {
                Some(path) => {
                    fs::write(&path, program)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
                None => print!("{program}"),
            }
        }
        Command::Check { backup } => {
            let design = read_design(&backup)?;
            let diags = lint_design(&design);
            for d in &diags {
                let severity = match d.severity {
                    LintSeverity::Warning => "warning",
                    LintSeverity::Info => "info",
                };
                let name = design.get(d.widget).map(|n| n.name.as_str()).unwrap_or("?");
                println!("{severity}[{}] {} ({name}): {}", d.rule, d.widget, d.message);
            }
            println!(
                "{}: {} widgets, {} findings",
                backup.display(),
                design.len(),
                diags.len()
            );
        }
        Command::Tree { backup, json } => {
            let design = read_design(&backup)?;
            let rows = design.outline();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    let strategy = design
                        .packing_method(row.id)
                        .map(|s| s.manager())
                        .unwrap_or("?");
                    println!(
                        "{:indent$}{} {} [{strategy}]",
                        "",
                        row.kind,
                        row.name,
                        indent = row.depth * 2
                    );
                }
            }
        }
    }

    Ok(())
}

fn read_design(path: &Path) -> Result<Design> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let design =
        load_backup(&text).with_context(|| format!("failed to load {}", path.display()))?;
    debug!("{}: {} widgets", path.display(), design.len());
    Ok(design)
}

/// Explicit `--config` must exist; the default file is optional.
fn read_config(path: Option<&Path>) -> Result<EmitConfig> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG), false),
    };
    if !path.exists() {
        if required {
            bail!("config file {} does not exist", path.display());
        }
        return Ok(EmitConfig::default());
    }
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: EmitConfig =
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
    debug!("using {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_export_args() {
        let cli = Cli::try_parse_from(["tkforge", "export", "login.tkf", "-o", "login.py"]).unwrap();
        match cli.command {
            Command::Export { backup, output, config } => {
                assert_eq!(backup, PathBuf::from("login.tkf"));
                assert_eq!(output, Some(PathBuf::from("login.py")));
                assert!(config.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        assert!(read_config(Some(Path::new("/nonexistent/tkforge.toml"))).is_err());
    }

    #[test]
    fn toml_config_overrides_defaults() {
        let config: EmitConfig = toml::from_str("class_name = \"Login\"\nindent = 2\n").unwrap();
        assert_eq!(config.class_name, "Login");
        assert_eq!(config.indent, 2);
        assert_eq!(config.window_title, EmitConfig::default().window_title);
    }
}
