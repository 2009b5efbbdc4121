//! Content classification heuristic.
//!
//! Given raw clipboard text, determine a semantic [`ContentType`] and an
//! optional subcategory. This is a heuristic, not a parser: false positives
//! and negatives are acceptable and callers must tolerate them. The function
//! is pure and total — the same input always yields the same result and no
//! input makes it fail.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ContentType;

/// Result of classifying a piece of clipboard content.
///
/// `subcategory` is an independent refinement axis (e.g. `email`, `json`);
/// the current heuristic never assigns one, but the field is part of the data
/// model and is carried through persistence and sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub content_type: ContentType,
    pub subcategory: Option<String>,
}

impl Classification {
    fn of(content_type: ContentType) -> Self {
        Self {
            content_type,
            subcategory: None,
        }
    }
}

/// Whole-string URL pattern. Anything with embedded whitespace is not a URL.
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("url pattern is valid"));

/// Substrings whose presence suggests the content is source code.
const CODE_INDICATORS: &[&str] = &[
    "{", "}", // JSON, objects
    "function", "const ", "let ", "var ", // JavaScript
    "import ", "export ", // ES modules
    "<div", "<span", "<p", "<a", // HTML
    "class ", "def ", "if ", "for ", // various languages
    "#!/", // shebang
];

/// Classify raw clipboard text.
///
/// Empty input is plain text. A strict whole-string `http(s)` URL is `Url`.
/// Content containing at least one code indicator together with one of
/// `;`, `{`, `}` is `Code`. Everything else is plain text.
pub fn classify(content: &str) -> Classification {
    if content.is_empty() {
        return Classification::of(ContentType::Text);
    }

    if URL_PATTERN.is_match(content) {
        return Classification::of(ContentType::Url);
    }

    let has_structure =
        content.contains(';') || content.contains('{') || content.contains('}');
    let has_indicator = CODE_INDICATORS
        .iter()
        .any(|indicator| content.contains(indicator));
    if has_indicator && has_structure {
        return Classification::of(ContentType::Code);
    }

    Classification::of(ContentType::Text)
}
