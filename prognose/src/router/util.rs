use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp the way the store queries expect it.
pub(crate) fn query_time(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
