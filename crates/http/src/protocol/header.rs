//! Request header storage.
//!
//! Header names keep the spelling the client sent, but every lookup is ASCII
//! case-insensitive. Inserting a name that is already present replaces the
//! earlier value, so the last occurrence on the wire wins.

use crate::protocol::ParseError;

/// Ordered collection of request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, returning the value it replaced if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let (name, value) = (name.into(), value.into());
        match self.entries.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(&name)) {
            Some(entry) => {
                let (_, old_value) = std::mem::replace(entry, (name, value));
                Some(old_value)
            }
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(existing, _)| existing.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Parses the `Content-Length` header, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidContentLength`] when the value is not an unsigned integer.
    pub fn content_length(&self) -> Result<Option<u64>, ParseError> {
        let Some(value) = self.get(http::header::CONTENT_LENGTH.as_str()) else {
            return Ok(None);
        };

        value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ParseError::invalid_content_length(format!("value {value:?} is not u64: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/html");

        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(headers.get("Accept"), None);
        assert!(headers.contains("Content-type"));
    }

    #[test]
    fn test_last_wins_and_keeps_latest_spelling() {
        let mut headers = Headers::new();
        assert_eq!(headers.insert("Host", "a"), None);
        headers.insert("Accept", "*/*");
        assert_eq!(headers.insert("HOST", "b"), Some("a".to_string()));

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("host"), Some("b"));
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec![("HOST", "b"), ("Accept", "*/*")]);
    }

    #[test]
    fn test_content_length() {
        let mut headers = Headers::new();
        assert_eq!(headers.content_length().unwrap(), None);

        headers.insert("content-length", " 21 ");
        assert_eq!(headers.content_length().unwrap(), Some(21));

        headers.insert("Content-Length", "-1");
        assert!(matches!(headers.content_length(), Err(ParseError::InvalidContentLength { .. })));

        headers.insert("Content-Length", "abc");
        assert!(matches!(headers.content_length(), Err(ParseError::InvalidContentLength { .. })));
    }
}
