// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "view-interactor")]
#[command(about = "Drive a headless 3D viewer through its interactor", long_about = None)]
pub struct Cli {
    /// Interactor configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Option values to merge over the defaults (JSON object)
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Record every event to this file
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Key presses to send, e.g. `G,X,shift+L,Return`
    #[arg(long, value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Replay a recorded interaction
    #[arg(long)]
    pub play: Option<PathBuf>,

    /// Open a window and forward its input to the interactor
    #[arg(long, default_value = "false")]
    pub window: bool,

    /// Print the final options as JSON
    #[arg(long = "print-options", default_value = "false")]
    pub print_options: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_list() {
        let cli = Cli::parse_from(["view-interactor", "--keys", "G,X,shift+L", "--print-options"]);
        assert_eq!(cli.keys, vec!["G", "X", "shift+L"]);
        assert!(cli.print_options);
        assert!(!cli.window);
        assert!(cli.play.is_none());
    }
}
