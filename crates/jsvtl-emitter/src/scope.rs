//! Scope flattening.
//!
//! JavaScript block scoping lets `a` name different variables in nested
//! blocks; VTL has a single flat namespace per template. The `ScopeTable`
//! keeps a stack of frames mapping source names to template names and hands
//! out template names that are unique across the whole transpilation, so a
//! shadowing declaration never clobbers an outer binding.
//!
//! ```text
//! const a = 0;      // a
//! { const a = 1; }  // a_1
//! const a2 = a;     // resolves to the outer `a`
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

/// Reserved global that receives the value of expression statements, since
/// VTL has no bare-expression statement.
pub const DISCARD_NAME: &str = "discard";

#[derive(Debug)]
pub struct ScopeTable {
    /// `frames[0]` is the global frame; the last entry is the current frame.
    frames: Vec<FxHashMap<String, String>>,
    /// Every template name handed out so far, including those of popped frames.
    assigned: FxHashSet<String>,
    /// Last suffix used per base name.
    suffixes: FxHashMap<String, u32>,
}

impl ScopeTable {
    /// A table containing only an empty global frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![FxHashMap::default()],
            assigned: FxHashSet::default(),
            suffixes: FxHashMap::default(),
        }
    }

    /// A table with the discard name and the caller's globals registered in
    /// the global frame.
    #[must_use]
    pub fn with_globals<I, S>(globals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        table.register_global(DISCARD_NAME);
        for name in globals {
            table.register_global(name.as_ref());
        }
        table
    }

    /// Bind `name` in the global frame. Registering the same global twice is
    /// a no-op.
    pub fn register_global(&mut self, name: &str) {
        if self.frames[0].contains_key(name) {
            return;
        }
        let target = self.unique_name(name);
        tracing::trace!(name, target = %target, "registered global");
        self.frames[0].insert(name.to_string(), target);
    }

    /// Bind `name` in the current frame and return its template name.
    ///
    /// The first declaration of a base name keeps it as-is; every later one
    /// (in any frame, live or already popped) gets the next free `_N` suffix.
    pub fn declare(&mut self, name: &str) -> String {
        let target = self.unique_name(name);
        tracing::trace!(name, target = %target, depth = self.depth(), "declared");
        self.current_frame_mut()
            .insert(name.to_string(), target.clone());
        target
    }

    /// Reserve a unique template name derived from `base` without binding
    /// any source name to it. Used for compiler-introduced temporaries,
    /// which user code must never be able to resolve.
    pub fn reserve_name(&mut self, base: &str) -> String {
        let target = self.unique_name(base);
        tracing::trace!(base, target = %target, "reserved temporary");
        target
    }

    /// Resolve `name` from the current frame outward.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .map(String::as_str)
    }

    /// Resolve `name` in the global frame only, ignoring user shadowing.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&str> {
        self.frames[0].get(name).map(String::as_str)
    }

    pub fn push_scope(&mut self) {
        self.frames.push(FxHashMap::default());
        tracing::trace!(depth = self.depth(), "push scope");
    }

    pub fn pop_scope(&mut self) {
        debug_assert!(self.frames.len() > 1, "attempted to pop the global scope");
        if self.frames.len() > 1 {
            self.frames.pop();
        }
        tracing::trace!(depth = self.depth(), "pop scope");
    }

    /// Number of frames above the global frame.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    fn current_frame_mut(&mut self) -> &mut FxHashMap<String, String> {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn unique_name(&mut self, base: &str) -> String {
        if self.assigned.insert(base.to_string()) {
            return base.to_string();
        }
        let suffix = self.suffixes.entry(base.to_string()).or_insert(0);
        loop {
            *suffix += 1;
            let candidate = format!("{base}_{suffix}");
            if self.assigned.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::new()
    }
}
