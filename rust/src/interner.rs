//! Task id interning.
//!
//! Maps string task ids to dense integer indices in declaration order so the
//! passes can work on plain vectors.

use rustc_hash::FxHashMap;

/// Interned task index (u32 for compact storage and fast hashing).
pub type TaskIdx = u32;

/// String interner that maps task id strings to declaration-order indices.
#[derive(Debug, Clone)]
pub struct TaskIdInterner {
    to_int: FxHashMap<String, TaskIdx>,
    from_int: Vec<String>,
}

impl TaskIdInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern a new id. Returns `None` if the id was already interned, leaving
    /// the existing mapping untouched.
    pub fn intern_unique(&mut self, s: &str) -> Option<TaskIdx> {
        if self.to_int.contains_key(s) {
            return None;
        }
        let id = self.from_int.len() as TaskIdx;
        self.from_int.push(s.to_string());
        self.to_int.insert(s.to_string(), id);
        Some(id)
    }

    /// Get the index for an id, if it exists.
    #[inline]
    pub fn get(&self, s: &str) -> Option<TaskIdx> {
        self.to_int.get(s).copied()
    }

    /// Get the id for an index.
    #[inline]
    pub fn resolve(&self, id: TaskIdx) -> Option<&str> {
        self.from_int.get(id as usize).map(|s| s.as_str())
    }

    /// All ids in declaration order.
    pub fn ids(&self) -> &[String] {
        &self.from_int
    }

    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}

impl Default for TaskIdInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let mut interner = TaskIdInterner::with_capacity(10);

        let id1 = interner.intern_unique("task_a").unwrap();
        let id2 = interner.intern_unique("task_b").unwrap();

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(interner.resolve(id1), Some("task_a"));
        assert_eq!(interner.resolve(id2), Some("task_b"));
        assert_eq!(interner.get("task_a"), Some(id1));
        assert_eq!(interner.get("nonexistent"), None);
        assert_eq!(interner.ids(), &["task_a".to_string(), "task_b".to_string()]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut interner = TaskIdInterner::default();
        assert_eq!(interner.intern_unique("a"), Some(0));
        assert_eq!(interner.intern_unique("a"), None);
        assert_eq!(interner.len(), 1);
    }
}
