use std::collections::HashSet;

use crate::{
    compiler::Error,
    util::intern::{Interner, Name},
};

/// The flat, program-wide table of variables.
///
/// Every identifier starts out undeclared; it becomes declared exactly once,
/// during the declarations phase. Names are expected in their canonical
/// (uppercase) form. Declared variables are referred to by their [`Name`].
#[derive(Debug, Default)]
pub struct SymbolTable {
    idents: Interner,
    declared: HashSet<Name>,
}

impl SymbolTable {
    pub fn with_capacity(capacity: usize) -> SymbolTable {
        SymbolTable {
            idents: Interner::with_capacity(capacity),
            declared: HashSet::with_capacity(capacity),
        }
    }

    /// Returns false for any name that was never declared.
    pub fn is_declared(&self, name: &str) -> bool {
        self.idents
            .lookup(name)
            .is_some_and(|name| self.declared.contains(&name))
    }

    /// Marks `name` as declared.
    pub fn declare(&mut self, name: &str) -> Result<Name, Error> {
        let handle = self.idents.intern(name);
        if !self.declared.insert(handle) {
            return Err(Error::DuplicateDeclaration(name.into()));
        }
        Ok(handle)
    }

    /// Returns the handle of a declared variable.
    pub fn resolve(&self, name: &str) -> Result<Name, Error> {
        match self.idents.lookup(name) {
            Some(handle) if self.declared.contains(&handle) => Ok(handle),
            _ => Err(Error::UndefinedIdentifier(name.into())),
        }
    }

    /// Returns the canonical text of a declared variable.
    pub fn name(&self, handle: Name) -> &str {
        self.idents.get(handle)
    }
}
