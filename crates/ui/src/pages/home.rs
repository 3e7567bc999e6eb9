use crate::layout::{page, SITE_TITLE};

pub fn render() -> String {
    let body = format!(
        r#"<h1>{SITE_TITLE}</h1>
<ul>
<li><a href="/dashboard">Dashboard</a></li>
<li><a href="/backtest">Backtest</a></li>
<li><a href="/admin">Admin</a></li>
</ul>"#
    );
    page("Home", &body)
}
