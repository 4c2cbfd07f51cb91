//! cmdtree demo shell
//!
//! Hosts the sample command tree. With trailing arguments it runs one
//! command and exits (status 1 when the command was rejected); otherwise it
//! reads commands from stdin.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmdtree::config::DispatcherConfig;
use cmdtree::shell::{ShellPrincipal, build_dispatcher, run_command, run_repl};

/// Tree-structured command dispatcher demo: nested commands, aliases,
/// permissions and generated usage.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// TOML config file (display name, messages, shell principal).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Principal name. Overrides `[shell] principal`.
    #[arg(long = "as", value_name = "NAME")]
    principal: Option<String>,
    /// Grant a permission to the principal; repeatable, `*` grants all.
    #[arg(long = "grant", value_name = "PERMISSION")]
    grants: Vec<String>,
    /// Treat the principal as an interactive user.
    #[arg(long)]
    interactive: bool,
    /// Locale tag used to pick messages from `[locales.<tag>]`.
    #[arg(long)]
    locale: Option<String>,
    /// Log level (trace|debug|info|warn|error). `RUST_LOG` takes precedence.
    #[arg(long)]
    log_level: Option<String>,
    /// Disable colored output.
    #[arg(long, default_value_t = false)]
    no_color: bool,
    /// Command to run once, e.g. `economy pay alex 10`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn load_config(path: Option<&PathBuf>) -> Result<DispatcherConfig> {
    let Some(path) = path else {
        return Ok(DispatcherConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    DispatcherConfig::from_toml_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.shell.log_level.clone())
        .unwrap_or_else(|| "warn".to_string());
    init_logging(&level)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut shell = config.shell.clone();
    if let Some(name) = &cli.principal {
        shell.principal = name.clone();
    }
    shell.permissions.extend(cli.grants.iter().cloned());
    shell.interactive |= cli.interactive;
    if cli.locale.is_some() {
        shell.locale = cli.locale.clone();
    }
    let principal = ShellPrincipal::from_config(&shell);

    let dispatcher = build_dispatcher(&config);
    tracing::debug!(
        principal = %shell.principal,
        display_name = dispatcher.display_name(),
        "shell starting"
    );

    let stdout = io::stdout();
    let stderr = io::stderr();
    let (mut out, mut err) = (stdout.lock(), stderr.lock());

    if !cli.args.is_empty() {
        let executed = run_command(&dispatcher, &principal, &cli.args, &mut out, &mut err)?;
        return Ok(if executed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    run_repl(&dispatcher, &principal, stdin.lock(), prompt, &mut out, &mut err)?;
    Ok(ExitCode::SUCCESS)
}
