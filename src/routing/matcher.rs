//! Path segment matching.

/// Trait for matching a captured path segment against a pattern.
pub trait SegmentMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the (percent-decoded) segment satisfies this pattern.
    fn matches(&self, segment: &str) -> bool;
}

/// One or more ASCII decimal digits (`\d+`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitsMatcher;

impl SegmentMatcher for DigitsMatcher {
    fn matches(&self, segment: &str) -> bool {
        !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
    }
}
