use std::io::Write;
use std::path::PathBuf;

use auragrid_cli::{commands, logging, readline};
use auragrid_core::{GrowDirection, OverlayKind};
use clap::{Parser, Subcommand, ValueEnum};

fn main() -> Result<(), String> {
    logging::init();

    // One-shot when invoked with a command, interactive otherwise
    let cli = Cli::parse();
    if let Some(command) = cli.command {
        run(command)?;
        return Ok(());
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Status overlay preview harness")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an overlay against generated preview statuses
    Preview {
        #[arg(short, long, value_enum, default_value_t = KindArg::Player)]
        kind: KindArg,
        #[arg(short, long, default_value_t = 3)]
        ticks: u32,
        /// Seconds each tick advances the preview countdowns
        #[arg(short, long, default_value_t = 1.0)]
        step: f32,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration
    ShowConfig {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print slot positions for a grid
    Layout {
        #[arg(short, long, default_value_t = 30)]
        max: u32,
        #[arg(short, long, default_value_t = 10)]
        per_line: u32,
        /// Fill columns before rows
        #[arg(long)]
        columns: bool,
        #[arg(short, long, value_enum, default_value_t = GrowArg::DownRight)]
        grow: GrowArg,
    },
    Exit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Player,
    Target,
}

impl From<KindArg> for OverlayKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Player => OverlayKind::Player,
            KindArg::Target => OverlayKind::Target,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GrowArg {
    DownRight,
    DownLeft,
    UpRight,
    UpLeft,
}

impl From<GrowArg> for GrowDirection {
    fn from(arg: GrowArg) -> Self {
        match arg {
            GrowArg::DownRight => GrowDirection::DownRight,
            GrowArg::DownLeft => GrowDirection::DownLeft,
            GrowArg::UpRight => GrowDirection::UpRight,
            GrowArg::UpLeft => GrowDirection::UpLeft,
        }
    }
}

/// Run a command; returns true when the session should end
fn run(command: Commands) -> Result<bool, String> {
    match command {
        Commands::Preview {
            kind,
            ticks,
            step,
            config,
        } => commands::preview(kind.into(), ticks, step, config.as_deref())?,
        Commands::ShowConfig { config } => commands::show_config(config.as_deref())?,
        Commands::Layout {
            max,
            per_line,
            columns,
            grow,
        } => commands::layout(max, per_line, columns, grow.into()),
        Commands::Exit => {
            commands::exit();
            return Ok(true);
        }
    }
    Ok(false)
}

fn respond(line: &str) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "auragrid".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(command) => run(command),
        None => Ok(false),
    }
}
