//! Back/forward stack of fragments, the host-side `Location`.
//!
//! Router writes replace the current entry; only fragments typed by the user
//! push a new one, so in-app tab and article switches never consume the back
//! button.

use super::Location;

#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<String>,
    idx: usize,
}

impl SessionHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![normalize(initial)],
            idx: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.idx]
    }

    /// User-entered fragment: truncate forward history and push.
    pub fn push(&mut self, fragment: &str) {
        let fragment = normalize(fragment);
        if self.entries[self.idx] == fragment {
            return;
        }
        self.entries.truncate(self.idx + 1);
        self.entries.push(fragment);
        self.idx = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.idx > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.idx + 1 < self.entries.len()
    }

    /// Step back; returns the fragment now current.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.idx -= 1;
        Some(self.current())
    }

    /// Step forward; returns the fragment now current.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.idx += 1;
        Some(self.current())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Location for SessionHistory {
    fn fragment(&self) -> String {
        self.current().to_string()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.entries[self.idx] = normalize(fragment);
    }
}

fn normalize(fragment: &str) -> String {
    fragment.strip_prefix('#').unwrap_or(fragment).to_string()
}
