use crate::error::ReportError;
use crate::table::Table;
use serde_json::json;
use tracing::{trace, warn};

/// Trace colours, assigned per field name (stable across renders).
const LINE_COLORS: [&str; 5] = ["deepskyblue", "dimgray", "pink", "green", "purple"];

/// A self-contained chart `<div>`, embeddable in any page that loads the
/// Plotly runtime. Derived purely from `(table, field)`; no identity beyond
/// its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartFragment {
    field: String,
    html: String,
}

impl ChartFragment {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Sentinel emitted when a field has nothing to plot. A missing chart
    /// must not blank the rest of the page.
    pub fn placeholder(field: &str) -> Self {
        let html = format!(
            "<div id=\"{id}\" class=\"chart-placeholder\">no data available for {field}</div>",
            id = div_id(field),
        );
        Self {
            field: field.to_string(),
            html,
        }
    }
}

/// Render one column of `table` as a Plotly line series.
///
/// x = years in table order, y = the column's values with absent cells kept
/// as JSON `null` so the plot shows a gap rather than a zero. A column with
/// no plottable values yields [`ChartFragment::placeholder`]; only a column
/// that does not exist at all is an error.
pub fn render(table: &Table, field: &str) -> Result<ChartFragment, ReportError> {
    if !table.has_column(field) {
        return Err(ReportError::FieldNotFound(field.to_string()));
    }

    let series = table.series(field);
    if series.iter().all(|(_, value)| value.is_none()) {
        warn!("no plottable values for `{field}`; emitting placeholder");
        return Ok(ChartFragment::placeholder(field));
    }

    let x: Vec<&str> = series.iter().map(|(year, _)| *year).collect();
    let y: Vec<serde_json::Value> = series
        .iter()
        .map(|(_, value)| match value {
            Some(n) => json!(n),
            None => serde_json::Value::Null,
        })
        .collect();

    let div_id = div_id(field);
    let data = json!([{
        "type": "scatter",
        "name": field,
        "line": { "color": line_color(field) },
        "x": x,
        "y": y,
    }]);
    let layout = json!({
        "title": { "text": format!("{field} by fiscal year") },
        "xaxis": { "rangeslider": { "visible": true } },
    });

    trace!("rendered `{field}` over {} year(s)", series.len());
    let html = format!(
        "<div>\n    \
            <div id=\"{div_id}\" class=\"plotly-graph-div\" style=\"height:100%; width:100%;\"></div>\n    \
            <script type=\"text/javascript\">\n        \
                if (document.getElementById(\"{div_id}\")) {{\n            \
                    Plotly.newPlot(\"{div_id}\", {data}, {layout}, {{\"responsive\": true}});\n        \
                }}\n    \
            </script>\n\
        </div>",
    );

    Ok(ChartFragment {
        field: field.to_string(),
        html,
    })
}

// Ids derive from the field name alone, so re-rendering the same field
// yields a byte-identical fragment.
fn div_id(field: &str) -> String {
    let slug: String = field
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("chart-{slug}")
}

fn line_color(field: &str) -> &'static str {
    let sum: usize = field.bytes().map(usize::from).sum();
    LINE_COLORS[sum % LINE_COLORS.len()]
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
