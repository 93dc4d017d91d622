//! Default command resolution
//!
//! `pqview data.parquet` is shorthand for `pqview show data.parquet`: when the
//! first argument is neither a known command nor a reserved meta flag, `show`
//! is inserted in front of the arguments before clap sees them.

use clap::CommandFactory;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::cli::Cli;

/// Command inserted when none is named
pub const DEFAULT_COMMAND: &str = "show";

/// Top-level flags that must reach clap unchanged
pub const META_FLAGS: &[&str] = &[
    "-h",
    "--help",
    "-V",
    "--version",
    "--show-completion",
    "--install-completion",
];

/// Names and aliases of every registered command
pub fn command_names() -> Vec<String> {
    let cmd = Cli::command();
    cmd.get_subcommands()
        .flat_map(|sub| {
            std::iter::once(sub.get_name().to_string())
                .chain(sub.get_all_aliases().map(str::to_string))
        })
        .chain(std::iter::once("help".to_string()))
        .collect()
}

/// Process arguments (program name first) with the default command applied
pub fn resolve<I, T>(args: I, names: &[String]) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let needs_default = match args.get(1) {
        Some(first) => !is_command(first, names) && !is_meta_flag(first),
        None => false,
    };
    if needs_default {
        args.insert(1, OsString::from(DEFAULT_COMMAND));
    }
    args
}

/// A file or directory in the way of a command name
///
/// `pqview schema` always runs the `schema` command; if a path literally
/// named `schema` exists, the user probably meant to view it.
pub fn shadowed_path(args: &[OsString], names: &[String]) -> Option<PathBuf> {
    let first = args.get(1)?;
    if !is_command(first, names) {
        return None;
    }
    let path = PathBuf::from(first);
    path.exists().then_some(path)
}

fn is_command(arg: &OsString, names: &[String]) -> bool {
    arg.to_str().is_some_and(|s| names.iter().any(|n| n == s))
}

fn is_meta_flag(arg: &OsString) -> bool {
    arg.to_str()
        .map(|s| s.split_once('=').map_or(s, |(flag, _)| flag))
        .is_some_and(|flag| META_FLAGS.contains(&flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(args: &[&str]) -> Vec<String> {
        resolve(args.iter().copied(), &command_names())
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_command_names_include_every_command() {
        let names = command_names();
        for name in ["show", "schema", "height", "glimpse", "head", "tail", "sql", "csv", "completions"] {
            assert!(names.iter().any(|n| n == name), "missing {name}");
        }
    }

    #[test]
    fn test_bare_file_gets_show() {
        assert_eq!(resolved(&["pqview", "data.parquet"]), ["pqview", "show", "data.parquet"]);
        assert_eq!(
            resolved(&["pqview", "data.parquet", "--nrows", "3", "--all"]),
            ["pqview", "show", "data.parquet", "--nrows", "3", "--all"]
        );
    }

    #[test]
    fn test_known_command_untouched() {
        assert_eq!(resolved(&["pqview", "height", "x.parquet"]), ["pqview", "height", "x.parquet"]);
        assert_eq!(resolved(&["pqview", "show", "x.parquet"]), ["pqview", "show", "x.parquet"]);
    }

    #[test]
    fn test_meta_flags_untouched() {
        for flag in ["-h", "--help", "--show-completion", "--install-completion", "--version"] {
            assert_eq!(resolved(&["pqview", flag]), ["pqview", flag]);
        }
        assert_eq!(
            resolved(&["pqview", "--show-completion=bash"]),
            ["pqview", "--show-completion=bash"]
        );
    }

    #[test]
    fn test_no_arguments_untouched() {
        assert_eq!(resolved(&["pqview"]), ["pqview"]);
    }

    #[test]
    fn test_leading_option_gets_show() {
        assert_eq!(
            resolved(&["pqview", "--verbose", "x.parquet"]),
            ["pqview", "show", "--verbose", "x.parquet"]
        );
    }

    #[test]
    fn test_resolved_args_parse() {
        use clap::Parser;

        let cli = Cli::try_parse_from(resolve(["pqview", "x.parquet", "--ncols", "2"], &command_names())).unwrap();
        match cli.command {
            Some(crate::cli::Commands::Show(args)) => {
                assert_eq!(args.table.ncols, 2);
                assert_eq!(args.table.nrows, 10);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_shadowed_path_ignores_non_commands() {
        let args: Vec<OsString> = vec!["pqview".into(), "data.parquet".into()];
        assert_eq!(shadowed_path(&args, &command_names()), None);
    }
}
