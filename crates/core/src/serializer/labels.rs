//! Letter labels for option lists.
//!
//! Single option lists and the left matching column label from `a`; the right
//! matching column starts 13 letters in (`n`) so both columns can appear in
//! one record without colliding.

pub(crate) const RIGHT_LABEL_OFFSET: usize = 13;

const ALPHABET_LAST: usize = 25;

pub(crate) fn letter(index: usize) -> char {
    char::from(b'a' + index.min(ALPHABET_LAST) as u8)
}
