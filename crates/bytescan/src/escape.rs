use core::fmt;

use bstr::ByteSlice;

/// The byte that introduces an escape sequence.
pub const ESCAPE_MARKER: u8 = b'\\';

/// Conventional shorthand targets: each `(literal, target)` pair makes
/// `\<target>` decode to `<literal>` when the literal is configured as
/// escapable. Bytes without an entry are their own target (`\x` decodes
/// to `x`).
const CONVENTIONAL_SHORTHANDS: &[(u8, u8)] = &[(b'\t', b't'), (b'\n', b'n'), (b'\r', b'r')];

/// An immutable decode table from escape-target bytes to literal bytes.
///
/// Built once from the collection of bytes that are escapable in a given
/// context, then shared read-only across any number of
/// [`take_esc`](crate::Tokenizer::take_esc) calls. Configuring the same byte
/// twice is idempotent; configuring [`ESCAPE_MARKER`] itself is a caller
/// mistake that is deliberately not validated here.
#[derive(Clone)]
pub struct Escaper {
    table: [Option<u8>; 256],
}

impl Escaper {
    /// Builds an escaper for the given escapable bytes using the
    /// conventional control-character shorthands (tab decodes from `\t`,
    /// newline from `\n`, carriage return from `\r`; everything else from
    /// itself).
    #[must_use]
    pub fn new(escapable: &[u8]) -> Self {
        Self::with_shorthands(escapable, CONVENTIONAL_SHORTHANDS)
    }

    /// Builds an escaper with an explicit shorthand policy.
    ///
    /// `shorthands` lists `(literal, target)` aliases; an escapable byte
    /// with no alias decodes from itself. A later alias for the same
    /// literal wins.
    #[must_use]
    pub fn with_shorthands(escapable: &[u8], shorthands: &[(u8, u8)]) -> Self {
        let mut table = [None; 256];
        for &b in escapable {
            let target = shorthands
                .iter()
                .rev()
                .find(|&&(literal, _)| literal == b)
                .map_or(b, |&(_, target)| target);
            table[target as usize] = Some(b);
        }
        Escaper { table }
    }

    /// Returns the literal byte that the escape target `target` decodes to,
    /// or `None` when `\<target>` is not a recognized escape sequence.
    #[inline]
    #[must_use]
    pub fn decode(&self, target: u8) -> Option<u8> {
        self.table[target as usize]
    }
}

impl fmt::Debug for Escaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets: Vec<u8> = (0..=u8::MAX)
            .filter(|&b| self.table[b as usize].is_some())
            .collect();
        write!(f, "Escaper({:?})", targets.as_bstr())
    }
}

#[cfg(test)]
mod tests {
    use super::Escaper;

    #[test]
    fn identity_targets() {
        let esc = Escaper::new(b" ,=");
        assert_eq!(esc.decode(b' '), Some(b' '));
        assert_eq!(esc.decode(b','), Some(b','));
        assert_eq!(esc.decode(b'='), Some(b'='));
        assert_eq!(esc.decode(b'x'), None);
    }

    #[test]
    fn control_shorthands() {
        let esc = Escaper::new(b" \t\n");
        assert_eq!(esc.decode(b't'), Some(b'\t'));
        assert_eq!(esc.decode(b'n'), Some(b'\n'));
        // The raw control byte is not a target, only its shorthand is.
        assert_eq!(esc.decode(b'\t'), None);
        assert_eq!(esc.decode(b'r'), None);
    }

    #[test]
    fn duplicate_bytes_are_idempotent() {
        let esc = Escaper::new(b"XX  ");
        assert_eq!(esc.decode(b'X'), Some(b'X'));
        assert_eq!(esc.decode(b' '), Some(b' '));
    }

    #[test]
    fn custom_shorthand_policy() {
        let esc = Escaper::with_shorthands(b"\t\x00", &[(b'\t', b'T'), (b'\x00', b'0')]);
        assert_eq!(esc.decode(b'T'), Some(b'\t'));
        assert_eq!(esc.decode(b'0'), Some(b'\x00'));
        assert_eq!(esc.decode(b't'), None);
    }
}
