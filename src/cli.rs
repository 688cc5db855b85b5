use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Credential file path
    #[arg(short, long)]
    pub keys: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate text between English and Chinese
    Translate {
        /// Text to translate; read from stdin when omitted
        text: Option<String>,

        /// Translation direction: en-zh or zh-en
        #[arg(short, long, default_value = "en-zh")]
        direction: String,

        /// Use the non-default provider if both are configured
        #[arg(short, long)]
        switch: bool,
    },

    /// Check connectivity of the active provider with a minimal round trip
    Probe,

    /// Manage saved API credentials
    Keys {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
pub enum KeyAction {
    /// Save one or both API keys (existing keys are preserved)
    Set {
        /// Gemini API key
        #[arg(long)]
        gemini: Option<String>,

        /// Zhipu API key
        #[arg(long)]
        zhipu: Option<String>,
    },

    /// Show which keys are saved (values are not printed)
    Show,

    /// Delete the entire credential record
    Delete,
}
