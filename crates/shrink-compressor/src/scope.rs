//! Scope/Nesting Tracker — brace depth plus the stack of open function scopes.

use crate::table::ScopeId;
use shrink_core::InputFormatError;

#[derive(Debug, Clone, Copy)]
struct OpenScope {
    id: ScopeId,
    depth: usize,
}

#[derive(Debug, Default)]
pub struct NestingTracker {
    depth: usize,
    open: Vec<OpenScope>,
}

impl NestingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Depth the body of a function whose parameter list opens now will have.
    pub fn body_depth(&self) -> usize {
        self.depth + 1
    }

    pub fn open_brace(&mut self) {
        self.depth += 1;
    }

    /// Leave one brace level. Returns the scope this brace closes, if any.
    pub fn close_brace(&mut self, offset: usize) -> Result<Option<ScopeId>, InputFormatError> {
        if self.depth == 0 {
            return Err(InputFormatError::UnbalancedBrace { offset });
        }
        let closed = match self.open.last() {
            Some(top) if top.depth == self.depth => self.open.pop().map(|s| s.id),
            _ => None,
        };
        self.depth -= 1;
        Ok(closed)
    }

    /// Register a scope whose body starts one level below the current depth.
    pub fn open_scope(&mut self, id: ScopeId) {
        let depth = self.body_depth();
        self.open.push(OpenScope { id, depth });
    }

    /// True while inside the body of the innermost open scope, nested blocks included.
    pub fn is_active(&self) -> bool {
        self.open.last().is_some_and(|s| self.depth >= s.depth)
    }

    pub fn innermost(&self) -> Option<ScopeId> {
        self.open.last().map(|s| s.id)
    }

    /// Open scopes, innermost first.
    pub fn chain(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.open.iter().rev().map(|s| s.id)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}
