use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slidecast")]
#[command(author, version, about)]
#[command(long_about = "A narrated slide-graph player.\n\n\
    Decks are markdown files split into slides; captions are WebVTT.\n\n\
    Examples:\n  \
    slidecast deck.md                 Play a deck (fullscreen)\n  \
    slidecast deck.md --windowed      Play in a window\n  \
    slidecast deck.md --autoplay      Step slides on a timer\n  \
    slidecast fetch onboarding-01     Pull a deck from the generation service")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to play
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Caption track to play alongside (defaults to the .vtt sidecar)
    #[arg(long, global = false)]
    pub captions: Option<PathBuf>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Step through slides on a timer from the start
    #[arg(long, global = false)]
    pub autoplay: bool,

    /// Autoplay interval in milliseconds
    #[arg(long, global = false)]
    pub cadence: Option<u64>,

    /// Reload the deck when it changes on disk
    #[arg(long, global = false)]
    pub watch: bool,

    /// Start on a specific slide key (e.g. 03)
    #[arg(long, global = false)]
    pub slide: Option<String>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a deck and its captions without opening a window
    Check {
        /// Deck file to validate
        file: PathBuf,

        /// Caption track to validate (defaults to the .vtt sidecar)
        #[arg(long)]
        captions: Option<PathBuf>,
    },

    /// Download a generated deck and captions from the service
    Fetch {
        /// Deck identifier known to the service
        identifier: String,

        /// Directory to write the deck and captions into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Override the narration voice
        #[arg(long)]
        voice: Option<String>,

        /// Override the service URL
        #[arg(long)]
        url: Option<String>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.cadence_ms, service.url)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Check { file, captions }) => {
                crate::commands::check::run(&file, captions.as_deref(), self.quiet)
            }
            Some(Commands::Fetch {
                identifier,
                output_dir,
                voice,
                url,
            }) => crate::commands::fetch::run(
                &identifier,
                &output_dir,
                voice.as_deref(),
                url.as_deref(),
                self.quiet,
            ),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(
                        file,
                        self.captions,
                        crate::app::RunOptions {
                            windowed: self.windowed,
                            autoplay: self.autoplay,
                            cadence_ms: self.cadence,
                            watch: self.watch,
                            start_slide: self.slide,
                        },
                    )
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
