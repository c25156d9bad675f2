//! Adapter between the router and the record store.
//!
//! Parses the `/app-index` query into [`Criteria`] and the `/app-add` form body
//! into a [`NewRecord`], runs them against a [`RecordStore`] and renders the
//! result as HTML table rows.

use roster_http::protocol::response::escape_html;
use tracing::warn;

use crate::router::RouteError;
use crate::store::{Criteria, NewRecord, Record, RecordStore};

/// Placeholder in `app_list.html` replaced by the rendered rows.
pub const ROWS_PLACEHOLDER: &str = "{{students}}";

/// Builds list criteria from a raw query string.
///
/// Pairs without `=` are skipped, unknown keys are ignored, an empty value
/// clears that filter and a later pair for the same key wins. Whitespace
/// around `number` is ignored, so `number=+5` (a form-encoded space) reads as 5.
///
/// # Errors
///
/// [`RouteError::BadRequest`] when `number` isn't an unsigned integer.
pub fn parse_criteria(query: Option<&str>) -> Result<Criteria, RouteError> {
    let Some(query) = query else {
        return Ok(Criteria::all());
    };

    let kept = query.split('&').filter(|pair| pair.contains('=')).collect::<Vec<_>>().join("&");
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(&kept).map_err(|e| RouteError::bad_request(format!("invalid query: {e}")))?;

    let (mut number, mut first, mut last) = (None, None, None);
    for (key, value) in pairs {
        let slot = match key.as_str() {
            "number" => &mut number,
            "first" => &mut first,
            "last" => &mut last,
            _ => continue,
        };
        *slot = Some(value).filter(|value| !value.is_empty());
    }

    let number = number
        .map(|number| number.trim().parse::<u64>())
        .transpose()
        .map_err(|e| RouteError::bad_request(format!("invalid number: {e}")))?;

    Ok(Criteria { number, first, last })
}

/// Validates an `/app-add` form body: exactly two `key=value` pairs naming
/// `first` and `last`.
///
/// # Errors
///
/// [`RouteError::BadRequest`] for anything else.
pub fn parse_new_record(body: &[u8]) -> Result<NewRecord, RouteError> {
    let body = std::str::from_utf8(body).map_err(|e| RouteError::bad_request(format!("body is not utf-8: {e}")))?;
    let body = body.trim();

    let pairs: Vec<&str> = body.split('&').collect();
    if pairs.len() != 2 || pairs.iter().any(|pair| !pair.contains('=')) {
        return Err(RouteError::bad_request("expected exactly `first=..&last=..`"));
    }

    serde_urlencoded::from_str(body).map_err(|e| RouteError::bad_request(format!("invalid form: {e}")))
}

/// Runs `criteria` against the store; a failing store reads as empty.
pub fn list(store: &dyn RecordStore, criteria: &Criteria) -> Vec<Record> {
    store.query(criteria).unwrap_or_else(|e| {
        warn!(cause = %e, "can't read record store, treating it as empty");
        Vec::new()
    })
}

pub fn render_rows(records: &[Record]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "\n<tr>\n    <td>{}</td>\n    <td>{}</td>\n    <td>{}</td>\n</tr>\n",
                record.number,
                escape_html(&record.first),
                escape_html(&record.last)
            )
        })
        .collect()
}

pub fn render_list(template: &str, records: &[Record]) -> String {
    template.replace(ROWS_PLACEHOLDER, &render_rows(records))
}
