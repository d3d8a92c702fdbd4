//! Charging status classification.
//!
//! Status strings from the export are mapped to small ordinal codes so they
//! can be plotted on a stepped line chart.

/// Ordinal status code as plotted on the y axis.
pub type StatusCode = i8;

/// Code assigned to any status string not in the table below.
pub const UNKNOWN_CODE: StatusCode = -1;

/// Placeholder label for codes without a reverse mapping.
pub const UNKNOWN_LABEL: &str = "Onbekend";

/// Converts a status label into its ordinal code.
///
/// | Label                          | Code |
/// |--------------------------------|------|
/// | `Offline`                      | 0    |
/// | `Available`                    | 1    |
/// | `Charging`                     | 2    |
/// | `SuspendedEV` / `Suspended EV` | 3    |
/// | anything else                  | -1   |
pub fn to_code(label: &str) -> StatusCode {
    match label {
        "Offline" => 0,
        "Available" => 1,
        "Charging" => 2,
        "SuspendedEV" | "Suspended EV" => 3,
        _ => UNKNOWN_CODE,
    }
}

/// Converts an ordinal code back into its canonical label.
///
/// Codes outside `0..=3`, including [`UNKNOWN_CODE`], yield [`UNKNOWN_LABEL`].
pub fn to_label(code: StatusCode) -> &'static str {
    match code {
        0 => "Offline",
        1 => "Available",
        2 => "Charging",
        3 => "SuspendedEV",
        _ => UNKNOWN_LABEL,
    }
}
