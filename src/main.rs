use clap::{CommandFactory, Parser};
use console::style;
use miette::Result;
use pqview::cli::commands::slice::End;
use pqview::cli::{default_command, Cli, Commands};
use pqview::core::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let names = default_command::command_names();
    let args = default_command::resolve(std::env::args_os(), &names);
    let shadowed = default_command::shadowed_path(&args, &names);
    let cli = Cli::parse_from(args);

    init_logging(cli.global.verbose);

    if let Some(path) = shadowed {
        eprintln!(
            "{} '{}' is a command name; to view the file use: pqview show ./{}",
            style("note:").yellow(),
            path.display(),
            path.display()
        );
    }

    if let Some(shell) = cli.show_completion {
        return pqview::cli::commands::completions::show(shell);
    }
    if let Some(shell) = cli.install_completion {
        return pqview::cli::commands::completions::install(shell);
    }

    let Some(command) = cli.command else {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingSubcommand,
                "a FILE or a command is required",
            )
            .exit();
    };

    // Only commands that render tables or glimpses read the config
    let config_path = cli.global.config.as_deref();

    match command {
        Commands::Show(args) => pqview::cli::commands::show::run(args, &Config::load(config_path)?),
        Commands::Schema(args) => pqview::cli::commands::schema::run(args),
        Commands::Height(args) => pqview::cli::commands::height::run(args),
        Commands::Glimpse(args) => {
            pqview::cli::commands::glimpse::run(args, &Config::load(config_path)?)
        }
        Commands::Head(args) => {
            pqview::cli::commands::slice::run(args, End::Head, &Config::load(config_path)?)
        }
        Commands::Tail(args) => {
            pqview::cli::commands::slice::run(args, End::Tail, &Config::load(config_path)?)
        }
        Commands::Sql(args) => pqview::cli::commands::sql::run(args, &Config::load(config_path)?),
        Commands::Csv(args) => pqview::cli::commands::csv::run(args),
        Commands::Completions(args) => pqview::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `PQVIEW_LOG` takes an EnvFilter directive and overrides `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "pqview=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env("PQVIEW_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}
