//! Output formatting shared by the tools: filtering, display caps with a remainder
//! note, and the final text block

use rmcp::model::{CallToolResult, Content};

/// Text returned by a tool. Successes and failures share this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    text: String,
}

impl ToolResponse {
    /// Response with the given text
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The response text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Single text block result. Blank text is replaced so the block is never empty.
    pub fn into_call_tool_result(self) -> CallToolResult {
        let text = if self.text.trim().is_empty() {
            "Command completed with no output.".to_string()
        } else {
            self.text
        };
        CallToolResult::success(vec![Content::text(text)])
    }
}

/// Keep entries containing `filter`, ignoring ASCII case. `None` or blank keeps all.
pub fn filter_entries<T, F>(entries: Vec<T>, filter: Option<&str>, text_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    match filter.map(str::trim).filter(|filter| !filter.is_empty()) {
        Some(filter) => {
            let needle = filter.to_lowercase();
            entries
                .into_iter()
                .filter(|entry| text_of(entry).to_lowercase().contains(&needle))
                .collect()
        }
        None => entries,
    }
}

/// Entries after applying a display cap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// At most `cap` entries
    pub shown:     Vec<T>,
    /// Entries before capping
    pub total:     usize,
    /// `total - shown.len()`
    pub remaining: usize,
}

impl<T> Page<T> {
    /// First `cap` entries of `entries`
    pub fn first(entries: Vec<T>, cap: usize) -> Self {
        let total = entries.len();
        let shown: Vec<T> = entries.into_iter().take(cap).collect();
        let remaining = total - shown.len();
        Self {
            shown,
            total,
            remaining,
        }
    }

    /// Last `cap` counted entries of `entries`, for logs where the newest lines matter.
    ///
    /// Entries for which `counts` is false (section markers) never use up the cap and are
    /// kept when they fall inside the shown tail. `total` and `remaining` count only
    /// counted entries.
    pub fn last<F>(entries: Vec<T>, cap: usize, counts: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        let total = entries.iter().filter(|entry| counts(entry)).count();
        let mut seen = 0;
        let start = entries
            .iter()
            .rposition(|entry| {
                if counts(entry) {
                    seen += 1;
                }
                seen > cap
            })
            .map_or(0, |index| index + 1);
        let shown: Vec<T> = entries.into_iter().skip(start).collect();
        Self {
            shown,
            total,
            remaining: total.saturating_sub(cap),
        }
    }

    /// Trailing note when entries were dropped, empty otherwise
    pub fn truncation_note(&self, noun: &str) -> String {
        if self.remaining == 0 {
            String::new()
        } else {
            format!(
                "\n\n... and {} more {noun}. Use filter to narrow results.",
                self.remaining
            )
        }
    }
}

/// ` (filtered by 'F')`, or nothing without a filter
pub fn filter_suffix(filter: Option<&str>) -> String {
    filter
        .map(str::trim)
        .filter(|filter| !filter.is_empty())
        .map_or_else(String::new, |filter| format!(" (filtered by '{filter}')"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let entries = vec!["com.Google.maps", "com.example.app", "org.GOOGLE.x"];
        let kept = filter_entries(entries, Some("google"), |entry| *entry);
        assert_eq!(kept, vec!["com.Google.maps", "org.GOOGLE.x"]);
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        let entries = vec!["a", "b"];
        assert_eq!(filter_entries(entries.clone(), Some("  "), |e| *e), entries);
        assert_eq!(filter_entries(entries.clone(), None, |e| *e), entries);
    }

    #[test]
    fn test_page_first_reports_remainder() {
        let page = Page::first((0..120).collect(), 50);
        assert_eq!(page.shown.len(), 50);
        assert_eq!(page.total, 120);
        assert_eq!(page.remaining, 70);
        assert_eq!(
            page.truncation_note("packages"),
            "\n\n... and 70 more packages. Use filter to narrow results."
        );
    }

    #[test]
    fn test_page_under_cap_has_no_note() {
        let page = Page::first(vec![1, 2, 3], 50);
        assert_eq!(page.remaining, 0);
        assert_eq!(page.truncation_note("packages"), "");
    }

    #[test]
    fn test_page_last_keeps_newest() {
        let page = Page::last(vec![1, 2, 3, 4, 5], 2, |_| true);
        assert_eq!(page.shown, vec![4, 5]);
        assert_eq!(page.remaining, 3);
    }

    #[test]
    fn test_page_last_skips_uncounted_markers() {
        let entries = vec!["-- main", "a", "-- system", "b", "c"];
        let page = Page::last(entries, 2, |entry| !entry.starts_with("--"));
        assert_eq!(page.shown, vec!["-- system", "b", "c"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.remaining, 1);

        let page = Page::last(vec!["-- main", "a", "-- system", "b"], 2, |e| !e.starts_with("--"));
        assert_eq!(page.shown, vec!["-- main", "a", "-- system", "b"]);
        assert_eq!(page.remaining, 0);
    }

    #[test]
    fn test_blank_response_is_replaced() {
        let result = ToolResponse::text("  ").into_call_tool_result();
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_filter_suffix() {
        assert_eq!(filter_suffix(Some("maps")), " (filtered by 'maps')");
        assert_eq!(filter_suffix(None), "");
    }
}
