//! Range scans over the world state
//!
//! A [`StateRange`] is a one-shot, key-ordered sequence. The store that
//! produced it may hold resources for as long as it is open; those are
//! released exactly once, either when the sequence is drained or when it is
//! dropped, whichever happens first. Early returns and `?` therefore cannot
//! leak a scan.

use std::fmt;
use std::ops::Bound;

/// One world state entry yielded by a range scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Entry key
    pub key: String,
    /// Raw stored bytes
    pub value: Vec<u8>,
}

impl KeyValue {
    /// Create an entry
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Translate scan bounds into map bounds
///
/// `start` is inclusive and `end` exclusive; an empty string leaves that side
/// open, so `("", "")` covers the whole key space.
pub fn scan_bounds(start: &str, end: &str) -> (Bound<String>, Bound<String>) {
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start.to_string())
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end.to_string())
    };
    (lower, upper)
}

/// Whether `key` falls inside the scan bounds
pub fn in_scan(start: &str, end: &str, key: &str) -> bool {
    (start.is_empty() || key >= start) && (end.is_empty() || key < end)
}

type Release = Box<dyn FnOnce() + Send>;

/// Lazy, non-restartable sequence of world state entries
pub struct StateRange {
    entries: Box<dyn Iterator<Item = KeyValue> + Send>,
    release: Option<Release>,
}

impl StateRange {
    /// Wrap an ordered entry iterator
    pub fn new<I>(entries: I) -> Self
    where
        I: Iterator<Item = KeyValue> + Send + 'static,
    {
        Self {
            entries: Box::new(entries),
            release: None,
        }
    }

    /// Attach a hook run once when the range is drained or dropped
    ///
    /// Hooks attached to the same range run in attachment order.
    pub fn on_release<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.release = Some(match self.release.take() {
            Some(previous) => Box::new(move || {
                previous();
                hook();
            }),
            None => Box::new(hook),
        });
        self
    }

    /// Release the range without draining it
    pub fn close(self) {}

    /// Whether the underlying resources are still held
    pub fn is_open(&self) -> bool {
        self.release.is_some()
    }

    fn release(&mut self) {
        if let Some(hook) = self.release.take() {
            hook();
        }
    }
}

impl Iterator for StateRange {
    type Item = KeyValue;

    fn next(&mut self) -> Option<KeyValue> {
        match self.entries.next() {
            Some(entry) => Some(entry),
            None => {
                self.release();
                self.entries = Box::new(std::iter::empty());
                None
            }
        }
    }
}

impl Drop for StateRange {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for StateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRange")
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}
