//! Sanitizer port
//!
//! A pure text transform applied once to every query before any agent sees
//! it. Implementations must not have side effects visible to the pipeline.

/// Redacts sensitive content from query text
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> String;
}

/// Sanitizer that returns the text unchanged
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn sanitize(&self, text: &str) -> String {
        text.to_string()
    }
}
