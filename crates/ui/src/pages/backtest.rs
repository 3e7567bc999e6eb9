use super::{DEFAULT_INTERVAL, DEFAULT_SYMBOL};
use crate::{
    layout::{escape_html, json_block, page},
    ActionStatus,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestPage {
    pub symbol: String,
    pub interval: String,
    pub result: ActionStatus,
}

impl Default for BacktestPage {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL, DEFAULT_INTERVAL)
    }
}

impl BacktestPage {
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
            result: ActionStatus::Idle,
        }
    }

    pub fn render(&self) -> String {
        let mut body = format!(
            r#"<h2>Backtest</h2>
<form method="post" action="/backtest/run">
<input name="symbol" value="{symbol}">
<input name="interval" value="{interval}">
<button type="submit">Run backtest</button>
{status}</form>
"#,
            symbol = escape_html(&self.symbol),
            interval = escape_html(&self.interval),
            status = self.result.render_indicator("backtest"),
        );
        if let Some(result) = self.result.value() {
            body.push_str(r#"<section class="result" data-result="backtest">"#);
            body.push_str(&json_block(result));
            body.push_str("</section>\n");
        }

        page("Backtest", &body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::BacktestPage;
    use crate::ActionStatus;

    #[test]
    fn interval_is_free_text() {
        let html = BacktestPage::new("BTCUSDT", "3h").render();

        assert!(html.contains(r#"<input name="interval" value="3h">"#));
        assert!(!html.contains("<select"));
    }

    #[test]
    fn renders_result_as_pretty_json() {
        let mut page = BacktestPage::default();
        page.result = ActionStatus::Succeeded(json!({ "trades": 4 }));

        let html = page.render();

        assert!(html.contains("<pre class=\"json\">{\n  &quot;trades&quot;: 4\n}</pre>"));
    }
}
