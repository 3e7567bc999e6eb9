use super::{DEFAULT_INTERVAL, DEFAULT_SYMBOL};
use crate::{
    layout::{escape_html, page},
    ActionStatus,
};

pub const DEFAULT_CONFIG_TEXT: &str = "{}";

/// Admin editor state. The bearer token lives only here, round-tripped
/// through the form; the sign-in password is never kept.
#[derive(Clone, PartialEq)]
pub struct AdminPage {
    pub token: String,
    pub config_text: String,
    pub message: String,
    pub action: ActionStatus,
    pub username: String,
    pub symbol: String,
    pub interval: String,
}

impl Default for AdminPage {
    fn default() -> Self {
        Self {
            token: String::new(),
            config_text: DEFAULT_CONFIG_TEXT.to_owned(),
            message: String::new(),
            action: ActionStatus::Idle,
            username: String::new(),
            symbol: DEFAULT_SYMBOL.to_owned(),
            interval: DEFAULT_INTERVAL.to_owned(),
        }
    }
}

impl std::fmt::Debug for AdminPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminPage")
            .field("token", &"<redacted>")
            .field("config_text", &self.config_text)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("username", &self.username)
            .field("symbol", &self.symbol)
            .field("interval", &self.interval)
            .finish()
    }
}

impl AdminPage {
    pub fn render(&self) -> String {
        let body = format!(
            r#"<h2>Admin</h2>
<form method="post" action="/admin/login">
<input name="username" value="{username}" placeholder="Username">
<input name="password" type="password" placeholder="Password">
<input type="hidden" name="config_text" value="{config_text}">
<button type="submit">Sign in</button>
</form>
<form method="post" action="/admin/config">
<textarea name="token" placeholder="Bearer token">{token}</textarea>
<textarea name="config_text" rows="15" cols="80">{config_text}</textarea>
<div>
<button type="submit" formaction="/admin/config">Update config</button>
<button type="submit" formaction="/admin/reset">Reset defaults</button>
<button type="submit" formaction="/admin/load">Load config</button>
</div>
<fieldset>
<legend>Model</legend>
<input name="symbol" value="{symbol}">
<input name="interval" value="{interval}">
<button type="submit" formaction="/admin/train">Train model</button>
</fieldset>
{status}</form>
<pre class="message">{message}</pre>
"#,
            username = escape_html(&self.username),
            token = escape_html(&self.token),
            config_text = escape_html(&self.config_text),
            symbol = escape_html(&self.symbol),
            interval = escape_html(&self.interval),
            status = self.action.render_indicator("admin action"),
            message = escape_html(&self.message),
        );

        page("Admin", &body)
    }
}
