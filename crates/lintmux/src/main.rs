use clap::builder::styling::{AnsiColor, Styles};
use clap::{ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::{Path, PathBuf};

use lintmux::commands;
use lintmux::commands::lint::LintArgs;

#[derive(Parser)]
#[command(name = "lintmux")]
#[command(about = "Run the configured linters for a file and merge their diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Human-friendly output with colors and formatting
    #[arg(long, global = true, conflicts_with = "compact")]
    pretty: bool,

    /// Compact output without colors (overrides TTY detection)
    #[arg(long, global = true, conflicts_with = "pretty")]
    compact: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a file with every tool configured for its language
    Lint(LintArgs),

    /// List configured languages and their tools
    List {
        /// Root directory (defaults to current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

/// Help output styling.
const HELP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().bold())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::Cyan.on_default().bold())
    .placeholder(AnsiColor::Cyan.on_default());

/// Determine color choice for help output.
/// Checks args and NO_COLOR before parsing since --help may exit early.
fn help_color_choice() -> ColorChoice {
    if std::env::var("NO_COLOR").is_ok() {
        return ColorChoice::Never;
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--compact") {
        return ColorChoice::Never;
    }
    if args.iter().any(|a| a == "--pretty") {
        return ColorChoice::Always;
    }
    ColorChoice::Auto
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: restores the default disposition of SIGPIPE before any other
    // thread exists; no memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn main() {
    reset_sigpipe();

    let matches = Cli::command()
        .styles(HELP_STYLES)
        .color(help_color_choice())
        .get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    init_logging(cli.verbose);

    // Pretty config is TTY-based, not root-specific
    let config = lintmux::config::LintmuxConfig::load(Path::new("."));
    let format =
        lintmux::output::OutputFormat::from_cli(cli.json, cli.pretty, cli.compact, &config.pretty);

    let exit_code = match cli.command {
        Commands::Lint(args) => commands::lint::run(args, format),
        Commands::List { root } => commands::list::run(root.as_deref(), &format),
    };

    std::process::exit(exit_code);
}
