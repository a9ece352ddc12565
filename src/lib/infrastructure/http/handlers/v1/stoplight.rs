//! Stoplight Elements page rendering the contact API's OpenAPI document.

use axum::response::Html;
use utoipa::OpenApi;

use super::{BASE_PATH, OPENAPI_PATH};
use crate::infrastructure::http::open_api::ApiDocs;

const ELEMENTS_CDN: &str = "https://unpkg.com/@stoplight/elements";

/// Render the docs page for the current API version
fn docs_page(title: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
    <title>{title} API</title>
    <script src="{ELEMENTS_CDN}/web-components.min.js"></script>
    <link rel="stylesheet" href="{ELEMENTS_CDN}/styles.min.css">
</head>
<body>
    <main role="main">
        <elements-api apiDescriptionUrl="{BASE_PATH}{OPENAPI_PATH}" router="hash" layout="stacked" />
    </main>
</body>
</html>
"#
    )
}

/// Stoplight API documentation.
pub async fn handler() -> Html<String> {
    Html(docs_page(&ApiDocs::openapi().info.title))
}
