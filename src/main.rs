use chrono::Local;
use clap::Parser;
use stockdash::cli::commands::{Cli, Commands};
use stockdash::cli::menu::Menu;
use stockdash::cli::style::{Role, Theme};
use stockdash::cli::table;
use stockdash::config::Settings;
use stockdash::domain::values::history_period::HistoryPeriod;
use stockdash::StockDash;

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => cli.apply(settings),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let theme = Theme::new(settings.color);
    let app = StockDash::new(&settings);

    let command = cli.command.unwrap_or(Commands::Menu);
    if let Err(e) = run_command(&app, theme, command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

async fn run_command(
    app: &StockDash,
    theme: Theme,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Check { tickers, json } => {
            let batch = app.check(&tickers).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&batch)?);
            } else {
                println!("{}", table::render_batch(&batch, &Local::now(), &theme));
            }
        }
        Commands::Watch { json } => {
            let list = app.watchlist()?;
            if list.is_empty() {
                let msg = "Your watchlist is empty! Add some stocks first.";
                println!("{}", theme.paint(Role::Warning, msg));
                return Ok(());
            }
            let batch = app.quotes(list.symbols()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&batch)?);
            } else {
                println!("{}", table::render_batch(&batch, &Local::now(), &theme));
            }
        }
        Commands::Add { tickers } => {
            let outcome = app.add(&tickers)?;
            println!("{}", table::render_add_outcome(&outcome, &theme));
        }
        Commands::Remove { tickers } => {
            let outcome = app.remove(&tickers)?;
            println!("{}", table::render_remove_outcome(&outcome, &theme));
        }
        Commands::List { json } => {
            let list = app.watchlist()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                println!("{}", table::render_watchlist(&list, &theme));
            }
        }
        Commands::History {
            ticker,
            period,
            json,
        } => {
            let period: HistoryPeriod = period.parse().map_err(|e: String| e)?;
            let series = app.history(&ticker, period).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&series.report())?);
            } else {
                println!("{}", table::render_history(&series, &theme));
            }
        }
        Commands::Menu => {
            let stdin = std::io::stdin();
            let mut menu = Menu::new(app, theme, Local::now, stdin.lock(), std::io::stdout());
            menu.run().await?;
        }
    }
    Ok(())
}
