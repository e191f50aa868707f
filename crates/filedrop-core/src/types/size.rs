//! Human-readable byte counts.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Format a byte count as `B`, `KB`, `MB`, `GB` or `TB` (binary multiples).
///
/// Counts below 1 KB are printed as whole bytes; larger counts use two
/// decimal places. Anything at or above 1 TB stays in TB.
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.2} KB", b / KB as f64)
    } else if bytes < GB {
        format!("{:.2} MB", b / MB as f64)
    } else if bytes < TB {
        format!("{:.2} GB", b / GB as f64)
    } else {
        format!("{:.2} TB", b / TB as f64)
    }
}
