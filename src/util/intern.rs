use std::{collections::HashMap, fmt, num::NonZeroU32, rc::Rc};

/// A handle to an interned identifier. To retrieve the text, use
/// [`Interner::get`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    // Here we use a NonZeroU32 to leverage niche layout optimization.
    handle: NonZeroU32,
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.handle)
    }
}

/// Deduplicates identifier strings, handing out [`Name`]s which are cheap to
/// copy, hash and compare.
#[derive(Default)]
pub struct Interner {
    map: HashMap<Rc<str>, Name>,
    vec: Vec<Rc<str>>,
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (i, interned) in self.vec.iter().enumerate() {
            map.entry(&(i + 1), interned);
        }
        map.finish()
    }
}

impl Interner {
    pub fn with_capacity(capacity: usize) -> Self {
        Interner {
            map: HashMap::with_capacity(capacity),
            vec: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Interns the provided value, returning a handle which can be used to
    /// retrieve it later.
    pub fn intern(&mut self, value: &str) -> Name {
        if let Some(&name) = self.map.get(value) {
            return name;
        }
        let len = u32::try_from(self.vec.len()).expect("interned out of capacity");
        let handle = NonZeroU32::MIN.saturating_add(len);
        let name = Name { handle };
        let key: Rc<str> = Rc::from(value);
        self.vec.push(Rc::clone(&key));
        self.map.insert(key, name);
        name
    }

    /// Returns the handle of an already interned value, without interning it.
    pub fn lookup(&self, value: &str) -> Option<Name> {
        self.map.get(value).copied()
    }

    /// Returns the text of the provided [`Name`]. Panics if the name was
    /// produced by another interner.
    pub fn get(&self, name: Name) -> &str {
        &self.vec[(name.handle.get() - 1) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interner() {
        let mut i = Interner::with_capacity(3);

        let alpha1 = i.intern("ALPHA");
        let beta1 = i.intern("BETA");
        let alpha2 = i.intern("ALPHA");

        assert_eq!(alpha1, alpha2);
        assert_ne!(alpha1, beta1);
        assert_eq!(i.get(alpha1), "ALPHA");
        assert_eq!(i.get(beta1), "BETA");
        assert_eq!(i.len(), 2);
    }

    #[test]
    fn lookup_does_not_intern() {
        let mut i = Interner::default();
        assert_eq!(i.lookup("X"), None);
        let x = i.intern("X");
        assert_eq!(i.lookup("X"), Some(x));
        assert_eq!(i.len(), 1);
    }
}
