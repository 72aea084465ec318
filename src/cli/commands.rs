use crate::config::Settings;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stockdash", about = "Stock watchlist and quote comparison dashboard")]
pub struct Cli {
    /// Watchlist file (overrides STOCKDASH_WATCHLIST)
    #[arg(long, global = true)]
    pub watchlist: Option<PathBuf>,
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and compare specific tickers
    Check {
        /// Tickers, comma- or space-separated
        #[arg(required = true)]
        tickers: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Fetch and compare every ticker in the watchlist
    Watch {
        #[arg(long)]
        json: bool,
    },
    /// Add tickers to the watchlist
    Add {
        #[arg(required = true)]
        tickers: Vec<String>,
    },
    /// Remove tickers from the watchlist
    Remove {
        #[arg(required = true)]
        tickers: Vec<String>,
    },
    /// Show the watchlist
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show daily closes for one ticker
    History {
        ticker: String,
        /// 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd or max
        #[arg(long, default_value = "1mo")]
        period: String,
        #[arg(long)]
        json: bool,
    },
    /// Interactive menu (default)
    Menu,
}

impl Cli {
    /// Applies command-line overrides on top of environment settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(path) = &self.watchlist {
            settings.watchlist_path = path.clone();
        }
        if self.no_color {
            settings.color = false;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["stockdash"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_check_collects_tickers() {
        let cli = Cli::try_parse_from(["stockdash", "check", "aapl,msft", "tsla", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Check { tickers, json }) => {
                assert_eq!(tickers, vec!["aapl,msft", "tsla"]);
                assert!(json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_add_requires_tickers() {
        assert!(Cli::try_parse_from(["stockdash", "add"]).is_err());
    }

    #[test]
    fn test_global_overrides() {
        let cli =
            Cli::try_parse_from(["stockdash", "list", "--watchlist", "/tmp/w.json", "--no-color"])
                .unwrap();
        let settings = cli.apply(Settings::default());
        assert_eq!(settings.watchlist_path, PathBuf::from("/tmp/w.json"));
        assert!(!settings.color);
    }
}
