use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,

    /// Path to the constituents listing file.
    ///
    /// Defaults to `TENK_LISTING` from the environment, then
    /// `./constituents.csv`.
    #[arg(short, long, global = true)]
    pub listing: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the S&P 500 constituents listing by symbol or name.
    Search {
        /// Case-insensitive substring, e.g. `apple` or `aapl`.
        term: String,
    },

    /// Fetch filing data for one company and write a chart report page.
    Report {
        /// Ticker symbol, e.g. `msft`.
        symbol: String,

        /// Fields to chart.
        ///
        /// If no fields are provided, the standard balance-sheet set is
        /// charted.
        #[arg(short, long)]
        fields: Option<Vec<String>>,

        /// Output path of the report page.
        #[arg(short, long, default_value = "report.html")]
        out: PathBuf,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
