//! Deterministic output-filename derivation
//!
//! The same URL always maps to the same filename, which is what makes the
//! exists-on-disk skip check a resumability contract rather than a guess.

use url::Url;

/// Derives the output filename for a document URL
///
/// Rules, in order:
/// 1. Take the last path segment and decode `%20` separators to `_`.
/// 2. If the URL carries a dataset tag (`DataSet%20N` or `DataSet N`
///    anywhere in it), prefix the name with `dataset_N_` so files from
///    different sets cannot collide on a shared basename.
/// 3. If the derived name is empty or does not end in `.pdf`
///    (case-insensitive), synthesize `document_{index+1}.pdf` from the
///    running input index instead.
pub fn derive_filename(url: &str, index: usize) -> String {
    let derived = Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.last().map(|s| s.to_string()))
        })
        .map(|segment| segment.replace("%20", "_"))
        .unwrap_or_default();

    if derived.is_empty() || !derived.to_ascii_lowercase().ends_with(".pdf") {
        return format!("document_{}.pdf", index + 1);
    }

    match dataset_tag(url) {
        Some(n) => format!("dataset_{}_{}", n, derived),
        None => derived,
    }
}

/// Finds a `DataSet N` tag in the URL, encoded or not
fn dataset_tag(url: &str) -> Option<u32> {
    for marker in ["DataSet%20", "DataSet "] {
        if let Some(pos) = url.find(marker) {
            let rest = &url[pos + marker.len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if !digits.is_empty() {
                return digits.parse().ok();
            }
        }
    }
    None
}
