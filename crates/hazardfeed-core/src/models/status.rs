use std::fmt;

/// Outcome of a single feed update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Fetch and parse succeeded; entries (possibly empty) are returned
    UpdateOk,
    /// Fetch succeeded but there was nothing to parse (e.g. HTTP 304)
    UpdateOkNoData,
    /// Fetch or parse failed; no entries are returned
    UpdateError,
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpdateStatus::UpdateOk => "OK",
            UpdateStatus::UpdateOkNoData => "OK_NO_DATA",
            UpdateStatus::UpdateError => "ERROR",
        };
        f.write_str(s)
    }
}
