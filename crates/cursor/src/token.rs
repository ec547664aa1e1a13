//! Cursor over opaque continuation tokens.

use serde::{Deserialize, Serialize};

use crate::Cursor;

/// A cursor over source-issued continuation tokens.
///
/// The source hands back a token with each page; advancing stores it. Tokens
/// are compared lexicographically, which holds for the sortable tokens most
/// sources issue (ULIDs, zero-padded offsets, ...). `None` means nothing has
/// been consumed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenCursor {
    token: Option<String>,
}

impl TokenCursor {
    /// Creates a cursor before the first token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from a previously stored token.
    pub fn resume(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl Cursor for TokenCursor {
    type Position = Option<String>;
    type Increment = String;

    fn position(&self) -> &Option<String> {
        &self.token
    }

    /// Stores `next` if it sorts after the current token. Stale tokens are
    /// ignored.
    fn advance_by(&mut self, next: String) {
        if self.token.as_deref().is_none_or(|current| next.as_str() > current) {
            self.token = Some(next);
        }
    }

    fn force_to(&mut self, position: Option<String>) {
        self.token = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cursor_accepts_any_token() {
        let mut cursor = TokenCursor::new();
        assert_eq!(cursor.token(), None);

        cursor.advance_by("01HQ0000".to_string());
        assert_eq!(cursor.token(), Some("01HQ0000"));
    }

    #[test]
    fn stale_tokens_are_ignored() {
        let mut cursor = TokenCursor::resume("b");
        cursor.advance_by("a".to_string());
        cursor.advance_by("b".to_string());
        assert_eq!(cursor.token(), Some("b"));

        cursor.advance_by("c".to_string());
        assert_eq!(cursor.token(), Some("c"));
    }

    #[test]
    fn force_to_can_rewind() {
        let mut cursor = TokenCursor::resume("m");
        cursor.force_to(None);
        assert_eq!(cursor, TokenCursor::new());
    }

    #[test]
    fn reached_tokens_sort_at_or_before_current() {
        let cursor = TokenCursor::resume("k");
        assert!(cursor.has_reached(&Some("a".to_string())));
        assert!(cursor.has_reached(&Some("k".to_string())));
        assert!(!cursor.has_reached(&Some("z".to_string())));
        assert!(!TokenCursor::new().has_reached(&Some("a".to_string())));
    }
}
