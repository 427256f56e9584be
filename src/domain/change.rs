/// One version-control log entry recorded for the release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Full commit hash
    pub hash: String,
    /// First line of the commit message
    pub summary: String,
    pub author: String,
}

impl Change {
    pub fn new(hash: impl Into<String>, summary: impl Into<String>, author: impl Into<String>) -> Self {
        Change {
            hash: hash.into(),
            summary: summary.into(),
            author: author.into(),
        }
    }

    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// Markdown list line for the notes
    pub fn to_line(&self) -> String {
        format!("- {} ({})", self.summary.trim(), self.short_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash() {
        let change = Change::new("abc1234def5678", "Fix parser", "Ann");
        assert_eq!(change.short_hash(), "abc1234");
        assert_eq!(Change::new("abc", "x", "y").short_hash(), "abc");
    }

    #[test]
    fn test_short_hash_with_multibyte_text() {
        // byte 7 falls inside the 'é'
        let change = Change::new("abcdefé", "Fix parser", "Ann");
        assert_eq!(change.short_hash(), "abcdefé");
        assert_eq!(change.to_line(), "- Fix parser (abcdefé)");

        let change = Change::new("日本語の変更", "Fix parser", "Ann");
        assert_eq!(change.short_hash(), "日本語の変更");
    }

    #[test]
    fn test_to_line() {
        let change = Change::new("abc1234def5678", " Fix parser ", "Ann");
        assert_eq!(change.to_line(), "- Fix parser (abc1234)");
    }
}
