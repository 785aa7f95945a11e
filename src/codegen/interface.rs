#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Motorola 68000 assembly.
    m68k,
    /// The abstract operations themselves.
    ops,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::m68k => f.write_str("m68k"),
            Target::ops => f.write_str("ops"),
        }
    }
}
