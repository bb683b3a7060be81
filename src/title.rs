//! Title derivation from raw document content.

/// Title used when the content is empty or contains only blank lines.
pub const FALLBACK_TITLE: &str = "Untitled";

/// Length cap applied to titles taken from a plain (non-heading) line.
const MAX_TITLE_CHARS: usize = 100;

/// Derive a display title from document content.
///
/// Scans line by line: the first markdown heading with a non-empty remainder
/// wins, wherever it appears among blank lines. If a non-empty plain line is
/// reached before any such heading, that line is the title, truncated to 100
/// characters. Blank-only content falls back to [`FALLBACK_TITLE`].
pub fn extract_title(content: &str) -> String {
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            let title = line.trim_start_matches('#').trim();
            if !title.is_empty() {
                return title.to_string();
            }
        } else if !line.is_empty() {
            return line.chars().take(MAX_TITLE_CHARS).collect();
        }
    }

    FALLBACK_TITLE.to_string()
}
