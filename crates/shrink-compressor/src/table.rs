//! Replacement tables — per-scope renaming decisions linked to ancestor scopes.
//!
//! Tables are filled during discovery and only read during emission. A
//! scope's ancestors may still gain bindings after the scope itself closes
//! (a nested function can be the first to reference an outer variable), so
//! ancestor links are handles into [`ScopeTables`] rather than copies.

use std::collections::{HashMap, HashSet};

/// Stable handle of a scope, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Original identifier and the form it is emitted as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameBinding {
    pub original: String,
    pub renamed: String,
}

impl RenameBinding {
    pub fn is_changed(&self) -> bool {
        self.original != self.renamed
    }
}

/// Bindings of one scope, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    bindings: Vec<RenameBinding>,
    index: HashMap<String, usize>,
}

impl ReplacementTable {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.bindings[i].renamed.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// First decision for a name wins.
    pub(crate) fn insert(&mut self, original: &str, renamed: String) {
        if self.index.contains_key(original) {
            return;
        }
        self.index.insert(original.to_string(), self.bindings.len());
        self.bindings.push(RenameBinding {
            original: original.to_string(),
            renamed,
        });
    }

    pub fn bindings(&self) -> &[RenameBinding] {
        &self.bindings
    }

    /// Bindings whose emitted form differs from the original.
    pub fn changed(&self) -> impl Iterator<Item = &RenameBinding> {
        self.bindings.iter().filter(|b| b.is_changed())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A function scope and its table.
#[derive(Debug, Clone)]
pub struct ScopeEntry {
    /// Offset of the `(` opening the formal-parameter list.
    pub start: usize,
    /// Offset of the owning `Function` token.
    pub function_start: usize,
    /// Brace depth of the function body.
    pub depth: usize,
    pub parent: Option<ScopeId>,
    /// Parameters and locals declared by the owning function.
    pub declared: HashSet<String>,
    pub table: ReplacementTable,
}

/// Arena of all scopes of one job.
#[derive(Debug, Clone, Default)]
pub struct ScopeTables {
    scopes: Vec<ScopeEntry>,
    by_start: HashMap<usize, ScopeId>,
}

impl ScopeTables {
    pub(crate) fn open(
        &mut self,
        start: usize,
        function_start: usize,
        depth: usize,
        parent: Option<ScopeId>,
        declared: HashSet<String>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(ScopeEntry {
            start,
            function_start,
            depth,
            parent,
            declared,
            table: ReplacementTable::default(),
        });
        self.by_start.insert(start, id);
        id
    }

    pub(crate) fn table_mut(&mut self, id: ScopeId) -> &mut ReplacementTable {
        &mut self.scopes[id.0].table
    }

    pub fn get(&self, id: ScopeId) -> &ScopeEntry {
        &self.scopes[id.0]
    }

    /// Scope whose parameter list opens at `start`.
    pub fn by_start(&self, start: usize) -> Option<ScopeId> {
        self.by_start.get(&start).copied()
    }

    /// Enclosing scopes, innermost first.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(self.get(id).parent, move |p| self.get(*p).parent)
    }

    /// Emitted form of `name` inside scope `id`: its own table first, then
    /// each ancestor innermost to outermost, else `name` unchanged.
    pub fn find<'a>(&'a self, id: ScopeId, name: &'a str) -> &'a str {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find_map(|scope| self.get(scope).table.get(name))
            .unwrap_or(name)
    }

    /// Whether `name` is a local of scope `id` or of one of its ancestors.
    pub fn binds(&self, id: ScopeId, name: &str) -> bool {
        std::iter::once(id).chain(self.ancestors(id)).any(|scope| {
            let entry = self.get(scope);
            entry.table.contains(name) || entry.declared.contains(name)
        })
    }

    /// Scopes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &ScopeEntry)> {
        self.scopes.iter().enumerate().map(|(i, s)| (ScopeId(i), s))
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Number of identifiers emitted under a new name.
    pub fn renamed_count(&self) -> usize {
        self.scopes.iter().map(|s| s.table.changed().count()).sum()
    }
}
