use crate::chart::{self, ChartFragment};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::fetch::{FetchClient, Query};
use crate::table::{self, Table};
use crate::validate;
use tracing::{info, warn};

/// Drives fetch → validate → build, one cycle per query.
///
/// A successful cycle hands back a [`Report`]; all charting happens off the
/// report, any number of times, without touching the backend again. There
/// is no path from a built report back to fetching; a new query means a
/// new `generate` call and a fresh report.
pub struct Generator {
    cfg: ReportConfig,
    fetcher: FetchClient,
}

impl Generator {
    pub fn new(cfg: ReportConfig) -> Self {
        let fetcher = FetchClient::new(cfg.clone());
        Self { cfg, fetcher }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.cfg
    }

    /// Run the pipeline to completion for one query.
    ///
    /// Network and validation failures propagate as-is; the caller owns
    /// page-level behaviour and must not render a blank success page over
    /// either of them.
    pub async fn generate(&self, query: Query) -> Result<Report, ReportError> {
        let time = std::time::Instant::now();

        let payload = self.fetcher.fetch(&query).await?;
        validate::validate(&payload, self.cfg.min_years)?;
        let table = table::build(payload);

        info!(
            "report ready for [{}] {} with {} year(s), {}",
            query.symbol,
            query.form_type,
            table.len(),
            crate::time_elapsed(time),
        );
        Ok(Report { query, table })
    }
}

/// One completed cycle: a validated, immutable table keyed by its query.
#[derive(Clone, Debug)]
pub struct Report {
    query: Query,
    table: Table,
}

impl Report {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Chart a single column. Fails only when the column is absent.
    pub fn chart(&self, field: &str) -> Result<ChartFragment, ReportError> {
        chart::render(&self.table, field)
    }

    /// Chart several columns for one page. A field that cannot be charted
    /// becomes its placeholder fragment; it never aborts sibling charts.
    pub fn charts<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Vec<ChartFragment> {
        fields
            .into_iter()
            .map(|field| match self.chart(field) {
                Ok(fragment) => fragment,
                Err(err) => {
                    warn!("skipping chart for `{field}`, error({err})");
                    ChartFragment::placeholder(field)
                }
            })
            .collect()
    }
}
