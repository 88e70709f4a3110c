//! Symbol Renamer — assigns short synthetic names during discovery.

use crate::scope::NestingTracker;
use crate::table::ScopeTables;
use std::collections::HashSet;

/// Job-scoped name generator. Synthetic names are `_` followed by the
/// counter in lowercase hex; the counter only advances when a name is used.
///
/// Identifiers spelled in the stream are reserved: the counter steps over
/// any value whose synthetic form is one of them, so a kept original or a
/// free global never shares a spelling with a renamed binding.
#[derive(Debug, Default)]
pub struct SymbolRenamer {
    counter: u32,
    reserved: HashSet<String>,
}

impl SymbolRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reserved(reserved: HashSet<String>) -> Self {
        Self { counter: 0, reserved }
    }

    /// Counter value of the last synthetic name handed out.
    pub fn issued(&self) -> u32 {
        self.counter
    }

    /// Synthetic name for `original`, or `original` itself when the
    /// synthetic form would be longer. Names already starting with `_` are
    /// also swapped at equal length so they stay out of the synthetic namespace.
    pub fn synthesize(&mut self, original: &str) -> String {
        let mut next = self.counter + 1;
        let mut candidate = format!("_{next:x}");
        while self.reserved.contains(&candidate) {
            next += 1;
            candidate = format!("_{next:x}");
        }
        let fits = candidate.len() < original.len()
            || (original.starts_with('_') && candidate.len() <= original.len());
        if fits {
            self.counter = next;
            candidate
        } else {
            original.to_string()
        }
    }

    /// Record the decision for one identifier occurrence.
    ///
    /// New bindings are decided in the innermost scope. References walk the
    /// open scope chain innermost first and stop at the first scope that has
    /// already decided the name or whose function declares it. Names found
    /// nowhere on the chain are globals or properties and stay untouched.
    pub fn discover(
        &mut self,
        name: &str,
        new_binding: bool,
        tracker: &NestingTracker,
        tables: &mut ScopeTables,
    ) {
        let Some(current) = tracker.innermost() else {
            return;
        };
        let owner = if new_binding {
            Some(current)
        } else {
            tracker.chain().find(|id| {
                let scope = tables.get(*id);
                scope.table.contains(name) || scope.declared.contains(name)
            })
        };
        let Some(owner) = owner else {
            return;
        };
        if tables.get(owner).table.contains(name) {
            return;
        }
        let renamed = self.synthesize(name);
        tracing::trace!(name, renamed = %renamed, scope = owner.index(), "binding decided");
        tables.table_mut(owner).insert(name, renamed);
    }
}
