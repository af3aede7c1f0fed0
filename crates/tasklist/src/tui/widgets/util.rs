use std::borrow::Cow;

use tasklist_core::TaskId;
use time::format_description::well_known::Rfc3339;
use unicode_segmentation::UnicodeSegmentation;

pub(in crate::tui) fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    if max_graphemes == 0 {
        return Cow::Owned(String::new());
    }

    let grapheme_count = UnicodeSegmentation::graphemes(input, true).count();
    if grapheme_count <= max_graphemes {
        return Cow::Borrowed(input);
    }

    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        let truncated: String = UnicodeSegmentation::graphemes(input, true)
            .take(max_graphemes)
            .collect();
        return Cow::Owned(truncated);
    }

    let keep = max_graphemes - ELLIPSIS_GRAPHEMES;
    let mut truncated: String = UnicodeSegmentation::graphemes(input, true).take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

/// Creation time encoded in `id`, in UTC.
pub(in crate::tui) fn format_created_at(id: TaskId) -> Option<String> {
    id.created_at()?.format(&Rfc3339).ok()
}

pub(in crate::tui) const fn checkbox_marker(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}
