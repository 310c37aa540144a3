use anyhow::Result;
use clap::Parser;
use tracing::debug;

use vs_cli::cli::commands::dispatch;
use vs_cli::cli::help::write_tool_help;
use vs_cli::cli::{AppContext, Args, exit_code_for, normalize_help_flag, parse_error_exit_code};
use vs_cli::config::{ConfigManager, ResolveOptions, resolve_config};
use vs_cli::output::{self, OutputConfig};
use vs_cli::paths;
use vs_cli::ui::Style;

/// Exit code after Ctrl+C, as a shell reports SIGINT.
const INTERRUPTED: i32 = 130;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "warn,vs_cli=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn build_context(quiet: bool) -> Result<AppContext> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let options = ResolveOptions { quiet };
    let config = resolve_config(&options, &config_file, &paths::tool_dir()?);
    debug!(?config, "resolved configuration");
    Ok(AppContext::new(config))
}

fn report(err: &anyhow::Error) -> i32 {
    vs_cli::warn!("{} {err:#}", Style::error("Error:"));
    exit_code_for(err)
}

/// Prints clap's output for a failed parse. Top-level help is followed by
/// the locator's own options.
async fn print_parse_error(err: &clap::Error) -> i32 {
    let _ = err.print();
    let code = parse_error_exit_code(err);
    if err.kind() != clap::error::ErrorKind::DisplayHelp {
        return code;
    }

    let tool_help = match build_context(false) {
        Ok(ctx) => ctx.where_service.help().await,
        Err(e) => {
            vs_cli::warn!("{} {e:#}", Style::warning("Warning:"));
            return code;
        }
    };
    println!();
    if let Err(e) = write_tool_help(&mut std::io::stdout().lock(), "vswhere options", tool_help) {
        debug!(error = %e, "failed to write locator help");
    }
    code
}

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_from(normalize_help_flag(std::env::args().collect())) {
        Ok(args) => args,
        Err(e) => std::process::exit(print_parse_error(&e).await),
    };
    init_logging(args.verbose);

    let ctx = match build_context(args.quiet) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::init(OutputConfig::new(args.quiet, args.no_color));
            std::process::exit(report(&e));
        }
    };
    output::init(OutputConfig::new(ctx.config.quiet, args.no_color));

    let code = tokio::select! {
        result = dispatch(args.command, &ctx) => match result {
            Ok(code) => code,
            Err(e) => report(&e),
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            debug!("interrupted");
            INTERRUPTED
        }
    };

    std::process::exit(code);
}
