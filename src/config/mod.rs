pub mod toml_config;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "oncall-bot")]
#[command(about = "Chat bot that answers who is on call for a team")]
pub struct CliConfig {
    /// Path to the bot configuration file
    #[arg(long, default_value = "oncall-bot.toml")]
    pub config: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON logs instead of the compact format")]
    pub json_logs: bool,
}
