mod cli;
mod report;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use std::path::PathBuf;
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preproccess the trace level, and open the .env file
fn preprocess(trace_level: Level) {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, show spinners instead
    let tui = cli.trace.is_none();

    // resolve the listing path: flag, then env, then the local default
    let listing = cli
        .listing
        .or_else(|| dotenv::var("TENK_LISTING").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./constituents.csv"));

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `tenk search <TERM>`: look up companies in the listing
        Search { term } => report::search(&listing, &term)?,

        // `tenk report <SYMBOL>`: run one fetch/validate/build cycle and
        // write the chart page
        Report {
            symbol,
            fields,
            out,
        } => report::run(&listing, &symbol, fields, &out, tui).await?,
    }

    Ok(())
}
