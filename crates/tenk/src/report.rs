use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tenk_report::chart::ChartFragment;
use tenk_report::config::ReportConfig;
use tenk_report::fetch::Query;
use tenk_report::generator::Generator;
use tenk_report::listing::Listing;
use tracing::{info, trace};

/// Default report set: the standard balance-sheet fields.
const DEFAULT_FIELDS: [&str; 5] = [
    "Assets",
    "Cash and Cash Equ",
    "Other Assets",
    "Liabilities",
    "Goodwill",
];

/// Print listing matches for a search term.
pub(crate) fn search(listing_path: &Path, term: &str) -> anyhow::Result<()> {
    let listing = Listing::load(listing_path)?;

    let matches = listing.search(term);
    if matches.is_empty() {
        println!("no companies match \"{term}\"");
        return Ok(());
    }
    for company in matches {
        println!(
            "{symbol:<8}{name} | {sector}",
            symbol = company.symbol,
            name = company.name,
            sector = company.sector,
        );
    }

    Ok(())
}

/// Resolve the symbol, run one report cycle, and write the chart page.
pub(crate) async fn run(
    listing_path: &Path,
    symbol: &str,
    fields: Option<Vec<String>>,
    out: &Path,
    tui: bool,
) -> anyhow::Result<()> {
    // 1. resolve the symbol against the listing
    trace!("resolving symbol `{symbol}` ...");
    let listing = Listing::load(listing_path)?;
    let company = listing
        .get(symbol)
        .with_context(|| format!("unknown symbol `{symbol}`; try `tenk search`"))?;

    // 2. fetch, validate and reshape the filing data
    let pb = if tui {
        spinner(format!(
            "collecting filings for [{}] {}",
            company.symbol, company.name
        ))
    } else {
        ProgressBar::hidden()
    };

    let generator = Generator::new(ReportConfig::from_env());
    let query = Query::new(company.form_type.as_str(), company.symbol.as_str());
    let report = generator.generate(query).await;
    pb.finish_and_clear();

    let report = report.with_context(|| {
        format!(
            "failed to build a report for [{}] {}",
            company.symbol, company.name
        )
    })?;

    // 3. chart the requested fields and write the page
    let fields =
        fields.unwrap_or_else(|| DEFAULT_FIELDS.iter().map(|field| field.to_string()).collect());
    let fragments = report.charts(fields.iter().map(String::as_str));
    let html = page(&company.name, &fragments);
    std::fs::write(out, html)
        .with_context(|| format!("failed to write {}", out.display()))?;

    if tui {
        println!(
            "report for [{}] {} written to {}",
            company.symbol,
            company.name,
            out.display()
        );
    }
    info!("report written to {}", out.display());

    Ok(())
}

fn spinner(msg: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner().with_message(msg).with_style(
        ProgressStyle::default_spinner()
            .template("{msg} {spinner:.magenta}")
            .expect("failed to set progress bar style"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// Fragments are self-contained; the page only supplies the Plotly runtime
// off the CDN and a heading.
fn page(title: &str, fragments: &[ChartFragment]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        body.push_str("    ");
        body.push_str(fragment.html());
        body.push('\n');
    }

    format!(
        "<!DOCTYPE html>\n\
        <html>\n\
        <head>\n    \
            <meta charset=\"utf-8\">\n    \
            <title>{title}</title>\n    \
            <script src=\"https://cdn.plot.ly/plotly-2.35.2.min.js\"></script>\n\
        </head>\n\
        <body>\n    \
            <h1>{title}</h1>\n\
        {body}\
        </body>\n\
        </html>\n"
    )
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
