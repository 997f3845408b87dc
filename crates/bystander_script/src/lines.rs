//! Logical line segmentation.
//!
//! A physical line ending in `\` continues onto the next physical line; the
//! marker is dropped and the two are joined without a separator.

/// The continuation marker at the end of a physical line.
pub const CONTINUATION: char = '\\';

/// Splits raw script text into logical lines.
///
/// Empty logical lines are skipped. A script ending on a continued line drops
/// the unfinished accumulator.
#[must_use]
pub fn split_lines(raw: &str) -> Vec<String> {
    numbered_lines(raw).into_iter().map(|(_, line)| line).collect()
}

/// Splits raw script text into logical lines paired with the 1-based number
/// of the physical line each one starts on.
#[must_use]
pub fn numbered_lines(raw: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending = String::new();
    let mut start = 1;

    for (i, physical) in raw.split('\n').enumerate() {
        let physical = physical.trim_end_matches('\r');
        if pending.is_empty() {
            start = i + 1;
        }

        if let Some(head) = physical.strip_suffix(CONTINUATION) {
            pending.push_str(head);
            continue;
        }

        pending.push_str(physical);
        if !pending.is_empty() {
            lines.push((start, std::mem::take(&mut pending)));
        }
    }

    lines
}
