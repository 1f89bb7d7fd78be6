//! Route templates for span and metric labels.

use salessense_app::domain::carts::models::CartKey;
use uuid::Uuid;

/// Collapse identifiers in `path` so that every request to the same route
/// shares one label.
pub(super) fn route_template(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::try_parse(segment).is_ok() {
                "{uuid}"
            } else if segment.parse::<CartKey>().is_ok() {
                "{key}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
