use regex::Regex;

use crate::connections::errors::SharingError;

/// A user-supplied connection name, either literal or containing `*` / `?` wildcards.
///
/// Both forms match case-insensitively, like Windows connection names.
#[derive(Debug, Clone)]
pub enum NamePattern {
    Exact(String),
    Wildcard { text: String, regex: Regex },
}

impl NamePattern {
    pub fn parse(text: &str) -> Result<Self, SharingError> {
        if !text.contains(['*', '?']) {
            return Ok(NamePattern::Exact(text.to_string()));
        }

        let mut source = String::from("(?i)^");
        for ch in text.chars() {
            match ch {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                other => source.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| {
            SharingError::Other(format!("Invalid connection name pattern '{}': {}", text, e))
        })?;
        Ok(NamePattern::Wildcard {
            text: text.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            NamePattern::Exact(text) => text,
            NamePattern::Wildcard { text, .. } => text,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, NamePattern::Wildcard { .. })
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Exact(text) => text.to_lowercase() == name.to_lowercase(),
            NamePattern::Wildcard { regex, .. } => regex.is_match(name),
        }
    }
}
