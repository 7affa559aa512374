//! In-memory model of the browser history collaborator.
//!
//! The engine never talks to a real `window.history`; it records the same
//! entry-stack semantics so the controller's URL side effects are explicit
//! and testable. Push truncates any forward entries before appending, the
//! way a browser does after back-navigation; replace swaps the current
//! entry in place without growing the stack.

use url::Url;

/// How a URL update affects the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Add a new entry; the back button will step through it.
    Push,
    /// Swap the current entry; repeated updates leave no trail.
    Replace,
}

/// A browser-like history stack: entries plus a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Url>,
    cursor: usize,
}

impl History {
    /// Create a history with a single initial entry.
    #[must_use]
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// The URL at the cursor.
    ///
    /// # Panics
    ///
    /// Panics only if the internal invariant (at least one entry, cursor in
    /// bounds) is broken, which no public operation can do.
    #[must_use]
    pub fn current(&self) -> &Url {
        self.entries
            .get(self.cursor)
            .expect("history holds at least one entry")
    }

    /// Apply a URL update with the given mode.
    pub fn update(&mut self, url: Url, mode: HistoryMode) {
        match mode {
            HistoryMode::Push => {
                self.entries.truncate(self.cursor + 1);
                self.entries.push(url);
                self.cursor += 1;
            }
            HistoryMode::Replace => {
                if let Some(slot) = self.entries.get_mut(self.cursor) {
                    *slot = url;
                }
            }
        }
    }

    /// Step the cursor back; returns the new current URL, or `None` when
    /// already at the oldest entry.
    pub fn back(&mut self) -> Option<&Url> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step the cursor forward; returns the new current URL, or `None`
    /// when already at the newest entry.
    pub fn forward(&mut self) -> Option<&Url> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Number of entries on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API completeness alongside [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
