//! core/history.rs
//!
//! Undo/redo as two stacks of whole states.
//! States are small (a tag snapshot), so no diffing.

#[derive(Debug, Clone)]
pub struct History<T> {
    undo: Vec<T>,
    redo: Vec<T>,
    limit: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}

const DEFAULT_LIMIT: usize = 100;

impl<T> History<T> {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Remember `previous` before an edit. Kills the redo branch.
    pub fn record(&mut self, previous: T) {
        self.redo.clear();
        if self.undo.len() == self.limit {
            self.undo.remove(0);
        }
        self.undo.push(previous);
    }

    /// Swap `current` with the last recorded state.
    pub fn undo(&mut self, current: &mut T) -> bool {
        let Some(prev) = self.undo.pop() else {
            return false;
        };
        self.redo.push(std::mem::replace(current, prev));
        true
    }

    pub fn redo(&mut self, current: &mut T) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push(std::mem::replace(current, next));
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
