use logos::Logos;
use std::fmt;

/// List markers recognised at the start of an outline line (after indentation)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMarker {
    /// `-`, `*` or `+` followed by whitespace, or `•`
    #[regex(r"[-*+][ \t]+")]
    #[regex(r"•[ \t]*")]
    Bullet,

    /// `1)`, `12)`
    #[regex(r"[0-9]+\)[ \t]*")]
    Parenthesized,

    /// Markdown heading hashes followed by whitespace
    #[regex(r"#+[ \t]+")]
    Heading,

    /// Bold/italic emphasis. Recognised so `**Bold**` is not read as a bullet.
    #[regex(r"\*\*+")]
    Emphasis,
}

impl LineMarker {
    /// Whether the marker is structural noise to drop from the section name
    pub fn is_strippable(self) -> bool {
        !matches!(self, LineMarker::Emphasis)
    }
}

impl fmt::Display for LineMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineMarker::Bullet => write!(f, "bullet"),
            LineMarker::Parenthesized => write!(f, "parenthesized number"),
            LineMarker::Heading => write!(f, "heading"),
            LineMarker::Emphasis => write!(f, "emphasis"),
        }
    }
}

/// Split a single leading list marker off `text` (which must already be
/// free of indentation). Returns the marker, if one was stripped, and the rest.
pub fn split_marker(text: &str) -> (Option<LineMarker>, &str) {
    // A bullet with nothing after it is still a bullet
    if matches!(text.trim_end(), "-" | "*" | "+") {
        return (Some(LineMarker::Bullet), "");
    }

    let mut lexer = LineMarker::lexer(text);
    match lexer.next() {
        Some(Ok(marker)) if marker.is_strippable() => {
            (Some(marker), &text[lexer.span().end..])
        }
        _ => (None, text),
    }
}
