//! Labeled-section extraction.
//!
//! Locates a filing section (e.g. "Item 1C", Cybersecurity) by searching
//! for its label and cutting at the earliest following section label. The
//! search is a substring heuristic: a label appearing in a table of
//! contents or a cross-reference will match too. That limitation is
//! accepted; callers needing higher fidelity must supply different labels.

/// Section labels that can follow "Item 1C" in a 10-K.
pub const DEFAULT_END_LABELS: &[&str] = &["item 1d", "item 2", "item 1b", "item 3", "item 7"];

/// Extract the section starting at `start_label`, case-insensitively.
///
/// Returns the substring from the first occurrence of `start_label`
/// (inclusive) to the earliest occurrence of any end label strictly after
/// it (exclusive). With no start label present, returns an empty string:
/// "section not found", not an error. With no end label after the start,
/// the section extends to the end of the text.
pub fn extract_section(text: &str, start_label: &str, end_labels: &[&str]) -> String {
    let lower = text.to_lowercase();
    let needle = start_label.to_lowercase();

    let Some(start) = lower.find(&needle) else {
        return String::new();
    };

    // Scan strictly after the start index
    let mut from = start + 1;
    while from < lower.len() && !lower.is_char_boundary(from) {
        from += 1;
    }

    let mut end: Option<usize> = None;
    for label in end_labels {
        if let Some(i) = lower.get(from..).and_then(|tail| tail.find(&label.to_lowercase())) {
            let absolute = from + i;
            if end.map_or(true, |e| absolute < e) {
                end = Some(absolute);
            }
        }
    }

    let end = end.unwrap_or(text.len());
    text.get(start..end).unwrap_or("").to_string()
}
