use serde_json::Value;

use super::{DEFAULT_INTERVAL, DEFAULT_SYMBOL, INTERVALS};
use crate::{
    layout::{encode_query_component, escape_html, json_block, page},
    ActionStatus,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPage {
    pub symbol: String,
    pub interval: String,
    pub symbol_query: String,
    pub symbols: ActionStatus,
    pub analysis: ActionStatus,
    pub prediction: ActionStatus,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL, DEFAULT_INTERVAL)
    }
}

impl DashboardPage {
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
            symbol_query: String::new(),
            symbols: ActionStatus::Idle,
            analysis: ActionStatus::Idle,
            prediction: ActionStatus::Idle,
        }
    }

    pub fn render(&self) -> String {
        let mut body = String::from("<h2>Dashboard</h2>\n");
        body.push_str(&self.analysis_form());
        body.push_str(&self.symbol_search());

        if let Some(analysis) = self.analysis.value() {
            body.push_str(&render_analysis(analysis));
        }
        if let Some(prediction) = self.prediction.value() {
            body.push_str(r#"<section class="result" data-result="prediction">"#);
            body.push_str(&json_block(prediction));
            body.push_str("</section>\n");
        }

        page("Dashboard", &body)
    }

    fn analysis_form(&self) -> String {
        format!(
            r#"<form method="post" action="/dashboard/analysis">
<input name="symbol" value="{symbol}" placeholder="Symbol">
<select name="interval">{options}</select>
<button type="submit">Run analysis</button>
{analysis_status}{prediction_status}</form>
"#,
            symbol = escape_html(&self.symbol),
            options = interval_options(&self.interval),
            analysis_status = self.analysis.render_indicator("analysis"),
            prediction_status = self.prediction.render_indicator("prediction"),
        )
    }

    fn symbol_search(&self) -> String {
        let mut html = format!(
            r#"<form method="get" action="/dashboard/symbols">
<input name="query" value="{query}" placeholder="Search symbols">
<input type="hidden" name="interval" value="{interval}">
<button type="submit">Find symbols</button>
{status}</form>
"#,
            query = escape_html(&self.symbol_query),
            interval = escape_html(&self.interval),
            status = self.symbols.render_indicator("symbol search"),
        );

        match self.symbols.value() {
            Some(Value::Array(found)) => {
                html.push_str(r#"<ul class="symbols">"#);
                for symbol in found {
                    let label = match symbol {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    html.push_str(&format!(
                        r#"<li><a href="/dashboard?symbol={}&amp;interval={}">{}</a></li>"#,
                        encode_query_component(&label),
                        encode_query_component(&self.interval),
                        escape_html(&label)
                    ));
                }
                html.push_str("</ul>\n");
            }
            Some(other) => html.push_str(&json_block(other)),
            None => {}
        }
        html
    }
}

fn interval_options(selected: &str) -> String {
    let mut options = String::new();
    if !INTERVALS.contains(&selected) {
        let value = escape_html(selected);
        options.push_str(&format!(r#"<option value="{value}" selected>{value}</option>"#));
    }
    for interval in INTERVALS {
        let marker = if interval == selected { " selected" } else { "" };
        options.push_str(&format!(r#"<option value="{interval}"{marker}>{interval}</option>"#));
    }
    options
}

fn render_analysis(analysis: &Value) -> String {
    let points = chart::points_from_indicators(analysis.get("indicators"));
    let signals = analysis.get("signals").map(json_block).unwrap_or_default();

    format!(
        r#"<section class="result" data-result="signals">{signals}</section>
<section class="result" data-result="indicators"><div class="chart-panel">{chart}</div></section>
"#,
        chart = chart::render(&points),
    )
}
