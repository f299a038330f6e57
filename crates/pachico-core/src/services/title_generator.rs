/// Maximum number of characters kept from the first message
pub const MAX_TITLE_CHARS: usize = 40;

const ELLIPSIS: &str = "...";

/// Derive a conversation title from the first user message.
///
/// The content is trimmed and cut to [`MAX_TITLE_CHARS`] characters. An
/// ellipsis is appended only when something was cut off.
pub fn derive_title(content: &str) -> String {
    let trimmed = content.trim();
    let mut title: String = trimmed.chars().take(MAX_TITLE_CHARS).collect();

    if trimmed.chars().count() > MAX_TITLE_CHARS {
        title.push_str(ELLIPSIS);
    }

    title
}
