//! Fenced code block extraction.

use regex::Regex;

/// Pulls the first ```` ```<language> ```` block out of a response segment.
#[derive(Debug, Clone)]
pub struct CodeBlockExtractor {
    pattern: Regex,
}

impl CodeBlockExtractor {
    /// Builds an extractor for fences tagged with `language`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn new(language: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"(?s)```{}(.*?)```", regex::escape(language)))?;
        Ok(Self { pattern })
    }

    /// Returns the trimmed interior of the first fenced block, or `""` when
    /// the segment has none.
    #[must_use]
    pub fn extract<'a>(&self, segment: &'a str) -> &'a str {
        self.pattern
            .captures(segment)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str().trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> CodeBlockExtractor {
        CodeBlockExtractor::new("typescript").unwrap()
    }

    #[test]
    fn extracts_trimmed_interior() {
        assert_eq!(ts().extract("noise ```typescript\nCODE\n``` trailing"), "CODE");
    }

    #[test]
    fn stops_at_first_closing_fence() {
        let segment = "```typescript\nfirst\n```\n```typescript\nsecond\n```";
        assert_eq!(ts().extract(segment), "first");
    }

    #[test]
    fn spans_multiple_lines() {
        let segment = "```typescript\nimport { Page } from '@playwright/test';\n\nexport class A {}\n```";
        assert_eq!(
            ts().extract(segment),
            "import { Page } from '@playwright/test';\n\nexport class A {}"
        );
    }

    #[test]
    fn other_language_or_no_fence_is_empty() {
        assert_eq!(ts().extract("```java\nclass A {}\n```"), "");
        assert_eq!(ts().extract("plain text"), "");
        assert_eq!(ts().extract("```typescript\nunterminated"), "");
    }
}
