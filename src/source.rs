use std::str::CharIndices;

/// The character stream the lexer pulls from.
///
/// Holds exactly one character of lookahead. Once the input is exhausted,
/// [`Source::current`] returns `None`, and further advancing is a no-op.
pub struct Source<'src> {
    src: &'src str,
    iter: CharIndices<'src>,
    current: Option<char>,
    offset: usize,
}

impl<'src> Source<'src> {
    pub fn new(src: &'src str) -> Source<'src> {
        let mut source = Source {
            src,
            iter: src.char_indices(),
            current: None,
            offset: 0,
        };
        source.advance();
        source
    }

    /// Returns the lookahead character.
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Moves to the next character.
    pub fn advance(&mut self) {
        match self.iter.next() {
            Some((offset, c)) => {
                self.offset = offset;
                self.current = Some(c);
            }
            None => {
                self.offset = self.src.len();
                self.current = None;
            }
        }
    }

    /// Returns the byte offset of the lookahead character, or the length of
    /// the input if it has been exhausted.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn src(&self) -> &'src str {
        self.src
    }
}
