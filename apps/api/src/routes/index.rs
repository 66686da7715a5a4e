use axum::response::Html;

/// Browser upload form. Mirrors `ui::session`: one file, submit disabled while
/// empty or loading, cosmetic step labels, `Error: ` prefixed failures.
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
