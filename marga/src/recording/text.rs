//! Buffer for text recognized while a waypoint is being recorded.

use std::collections::BTreeSet;

use log::debug;

/// Deduplicating collector for recognized strings.
///
/// Only collects between [`start_scanning`](Self::start_scanning) and
/// [`stop_scanning`](Self::stop_scanning).
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    texts: BTreeSet<String>,
    scanning: bool,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear pending texts and start collecting
    pub fn start_scanning(&mut self) {
        self.texts.clear();
        self.scanning = true;
    }

    /// Stop collecting; pending texts are kept until flushed
    pub fn stop_scanning(&mut self) {
        self.scanning = false;
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Add one recognized string. Returns true if it was new.
    pub fn observe(&mut self, text: impl Into<String>) -> bool {
        if !self.scanning {
            return false;
        }
        let text = text.into();
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let inserted = self.texts.insert(text.to_string());
        if inserted {
            debug!("Recognized text \"{}\"", text);
        }
        inserted
    }

    /// Pending texts in sorted order
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Take all pending texts
    pub fn flush(&mut self) -> Vec<String> {
        std::mem::take(&mut self.texts).into_iter().collect()
    }

    /// Drop pending texts and stop collecting
    pub fn clear(&mut self) {
        self.texts.clear();
        self.scanning = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_text_when_not_scanning() {
        let mut buffer = TextBuffer::new();
        assert!(!buffer.observe("EXIT"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_deduplicates_and_flushes() {
        let mut buffer = TextBuffer::new();
        buffer.start_scanning();
        assert!(buffer.observe("ROOM 101"));
        assert!(!buffer.observe("ROOM 101"));
        assert!(buffer.observe(" EXIT "));
        assert!(!buffer.observe("   "));
        buffer.stop_scanning();
        assert!(!buffer.observe("LATE"));

        assert_eq!(buffer.flush(), vec!["EXIT".to_string(), "ROOM 101".to_string()]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_start_clears_previous_scan() {
        let mut buffer = TextBuffer::new();
        buffer.start_scanning();
        buffer.observe("OLD");
        buffer.start_scanning();
        assert!(buffer.is_empty());
    }
}
