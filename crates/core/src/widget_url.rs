//! Target-provider widget URL parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static WIDGET_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/widgets/([0-9]+)/([0-9]+)/elements").expect("valid regex"));

/// Widget id and version as they appear in the URL (leading zeros kept).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetRef {
    pub widget_id: String,
    pub version: String,
}

/// Extract the widget id and version from a `.../widgets/{id}/{version}/elements`
/// URL. Returns `None` for missing, empty or non-matching input.
pub fn parse_widget_url(url: Option<&str>) -> Option<WidgetRef> {
    let caps = WIDGET_PATH_RE.captures(url?)?;
    Some(WidgetRef {
        widget_id: caps[1].to_string(),
        version: caps[2].to_string(),
    })
}
