use std::mem::take;
use std::path::Path;
use tracing::{debug, warn};

/// One row of the S&P 500 constituents listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Company {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    /// Filing category this listing reports on; common stock means `10-k`.
    pub form_type: String,
}

/// In-memory company lookup, loaded once from the static constituents file
/// (`Symbol,Name,Sector` with a header row).
#[derive(Clone, Debug, Default)]
pub struct Listing(Vec<Company>);

impl Listing {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| anyhow::anyhow!("failed to read listing at {path:?}: {err}"))?;
        let listing = Self::parse(&text)?;
        debug!("loaded {} companies from {path:?}", listing.len());
        Ok(listing)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut rows = parse_rows(text);
        anyhow::ensure!(!rows.is_empty(), "constituents listing is empty");

        let header = rows.remove(0);
        anyhow::ensure!(
            header
                .first()
                .is_some_and(|cell| cell.eq_ignore_ascii_case("symbol")),
            "unexpected listing header: {header:?}",
        );

        let mut companies = Vec::with_capacity(rows.len());
        for row in rows {
            if row.len() < 3 {
                warn!("skipping short listing row: {row:?}");
                continue;
            }
            let mut row = row.into_iter();
            companies.push(Company {
                symbol: row.next().expect("row length checked"),
                name: row.next().expect("row length checked"),
                sector: row.next().expect("row length checked"),
                form_type: "10-k".to_string(),
            });
        }

        Ok(Self(companies))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Company> {
        self.0.iter()
    }

    /// Case-insensitive substring match on symbol or name, in listing order.
    pub fn search(&self, term: &str) -> Vec<&Company> {
        let term = term.to_lowercase();
        self.0
            .iter()
            .filter(|company| {
                company.symbol.to_lowercase().contains(&term)
                    || company.name.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Exact symbol lookup, case-insensitive.
    pub fn get(&self, symbol: &str) -> Option<&Company> {
        self.0
            .iter()
            .find(|company| company.symbol.eq_ignore_ascii_case(symbol))
    }
}

// Minimal CSV parsing, quote and CRLF tolerant. The listing is a small
// static file; no need for a full reader crate.
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // flush a trailing row with no final newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
