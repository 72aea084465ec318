//! Interactive numbered menu over the watchlist and quote commands.

use crate::cli::style::{Role, Theme};
use crate::cli::table;
use crate::StockDash;
use chrono::{DateTime, Local};
use std::io::{self, BufRead, Write};

/// Source of the timestamp printed above each comparison table.
pub type Clock = fn() -> DateTime<Local>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    CheckTickers,
    CheckWatchlist,
    Add,
    Remove,
    View,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::CheckTickers),
            "2" => Some(Choice::CheckWatchlist),
            "3" => Some(Choice::Add),
            "4" => Some(Choice::Remove),
            "5" => Some(Choice::View),
            "6" => Some(Choice::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, W> {
    app: &'a StockDash,
    theme: Theme,
    clock: Clock,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(app: &'a StockDash, theme: Theme, clock: Clock, input: R, out: W) -> Self {
        Self {
            app,
            theme,
            clock,
            input,
            out,
        }
    }

    /// Runs until the user picks exit or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(line) = self.prompt("\nEnter your choice (1-6): ")? else {
                break;
            };
            match Choice::parse(&line) {
                Some(Choice::Exit) => {
                    let bye = self.theme.paint(Role::Success, "Thanks for using Stock Dashboard!");
                    writeln!(self.out, "\n{bye}\n")?;
                    break;
                }
                Some(choice) => {
                    if !self.handle(choice).await? {
                        break;
                    }
                }
                None => {
                    let msg = self.theme.paint(Role::Error, "Invalid choice. Please try again.");
                    writeln!(self.out, "{msg}")?;
                }
            }
        }
        self.out.flush()
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let t = self.theme;
        writeln!(self.out, "\n{}", t.paint(Role::Heading, "Stock Dashboard - Main Menu"))?;
        writeln!(self.out, "{}", t.rule('=', 50))?;
        for item in [
            "1. Check specific stocks",
            "2. Check watchlist",
            "3. Add to watchlist",
            "4. Remove from watchlist",
            "5. View watchlist",
            "6. Exit",
        ] {
            writeln!(self.out, "{item}")?;
        }
        writeln!(self.out, "{}", t.rule('=', 50))
    }

    /// Prints `label` and reads one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", self.theme.bold(label))?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report_error(&mut self, err: impl std::fmt::Display) -> io::Result<()> {
        let msg = self.theme.paint(Role::Error, &format!("Error: {err}"));
        writeln!(self.out, "{msg}")
    }

    /// Returns `false` when input ran out mid-action.
    async fn handle(&mut self, choice: Choice) -> io::Result<bool> {
        let t = self.theme;
        match choice {
            Choice::CheckTickers => {
                let Some(tickers) = self.prompt("Enter stock tickers (comma-separated): ")? else {
                    return Ok(false);
                };
                writeln!(self.out, "\n{}", t.paint(Role::Accent, "Fetching data...."))?;
                match self.app.check(&[tickers]).await {
                    Ok(batch) => {
                        let rendered = table::render_batch(&batch, &(self.clock)(), &t);
                        writeln!(self.out, "{rendered}")?;
                    }
                    Err(e) => self.report_error(e)?,
                }
            }
            Choice::CheckWatchlist => match self.app.watchlist() {
                Ok(list) if list.is_empty() => {
                    let msg = "Your watchlist is empty! Add some stocks first.";
                    writeln!(self.out, "{}", t.paint(Role::Warning, msg))?;
                }
                Ok(list) => {
                    writeln!(self.out, "\n{}", t.paint(Role::Accent, "Fetching data...."))?;
                    let batch = self.app.quotes(list.symbols()).await;
                    let rendered = table::render_batch(&batch, &(self.clock)(), &t);
                    writeln!(self.out, "{rendered}")?;
                }
                Err(e) => self.report_error(e)?,
            },
            Choice::Add => {
                let Some(tickers) = self.prompt("Enter tickers to add (comma-separated): ")? else {
                    return Ok(false);
                };
                match self.app.add(&[tickers]) {
                    Ok(outcome) => {
                        writeln!(self.out, "{}", table::render_add_outcome(&outcome, &t))?
                    }
                    Err(e) => self.report_error(e)?,
                }
            }
            Choice::Remove => {
                self.view()?;
                let Some(tickers) = self.prompt("Enter tickers to remove (comma-separated): ")?
                else {
                    return Ok(false);
                };
                match self.app.remove(&[tickers]) {
                    Ok(outcome) => {
                        writeln!(self.out, "{}", table::render_remove_outcome(&outcome, &t))?
                    }
                    Err(e) => self.report_error(e)?,
                }
            }
            Choice::View => self.view()?,
            Choice::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn view(&mut self) -> io::Result<()> {
        match self.app.watchlist() {
            Ok(list) => {
                let rendered = table::render_watchlist(&list, &self.theme);
                writeln!(self.out, "\n{rendered}")
            }
            Err(e) => self.report_error(e),
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
