//! Shell completion generation and installation
//!
//! # Usage
//!
//! ```bash
//! # Print a script (shell detected from $SHELL when omitted)
//! pqview completions zsh
//! pqview --show-completion
//!
//! # Write the script to the shell's usual location
//! pqview --install-completion
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

const BIN_NAME: &str = "pqview";

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    write_script(args.shell, &mut io::stdout())
}

/// `--show-completion [SHELL]`
pub fn show(shell: Option<Shell>) -> Result<()> {
    write_script(resolve_shell(shell)?, &mut io::stdout())
}

/// `--install-completion [SHELL]`
pub fn install(shell: Option<Shell>) -> Result<()> {
    let shell = resolve_shell(shell)?;
    let home = directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| miette::miette!("Could not determine the home directory"))?;

    let target = install_to(shell, &home)?;
    println!(
        "{} {} completion installed in {}",
        style("✓").green(),
        shell,
        target.display()
    );
    println!("Completion will take effect once you restart the terminal.");
    Ok(())
}

fn resolve_shell(shell: Option<Shell>) -> Result<Shell> {
    shell.or_else(Shell::from_env).ok_or_else(|| {
        miette::miette!(
            help = "pass the shell explicitly, e.g. --show-completion bash",
            "Could not detect the current shell from $SHELL"
        )
    })
}

fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
    Ok(())
}

/// Write the completion script under `home` and hook it into the shell's rc file
pub fn install_to(shell: Shell, home: &Path) -> Result<PathBuf> {
    let (script_path, rc) = match shell {
        Shell::Bash => {
            let script = home.join(".bash_completions").join(format!("{BIN_NAME}.sh"));
            let line = format!("source {}", script.display());
            (script, Some((home.join(".bashrc"), line)))
        }
        Shell::Zsh => {
            let script = home.join(".zfunc").join(format!("_{BIN_NAME}"));
            let line = "fpath+=~/.zfunc; autoload -Uz compinit; compinit".to_string();
            (script, Some((home.join(".zshrc"), line)))
        }
        Shell::Fish => {
            let script = home
                .join(".config")
                .join("fish")
                .join("completions")
                .join(format!("{BIN_NAME}.fish"));
            (script, None)
        }
        other => {
            return Err(miette::miette!(
                help = "use --show-completion and add the script to your shell profile manually",
                "Installing completions is not supported for {}",
                other
            ))
        }
    };

    let mut script = Vec::new();
    write_script(shell, &mut script)?;
    if let Some(parent) = script_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(&script_path, script).into_diagnostic()?;
    tracing::debug!(path = %script_path.display(), "completion script written");

    if let Some((rc_path, line)) = rc {
        append_line_once(&rc_path, &line)?;
    }
    Ok(script_path)
}

/// Append `line` to `path` unless some line already equals it
fn append_line_once(path: &Path, line: &str) -> Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).into_diagnostic(),
    };
    if existing.lines().any(|l| l.trim() == line) {
        return Ok(());
    }

    let mut contents = existing;
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(line);
    contents.push('\n');
    fs::write(path, contents).into_diagnostic()
}
