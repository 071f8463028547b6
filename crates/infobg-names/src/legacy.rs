//! Repair of the soft-sign defect in one generation of legacy tables.
//!
//! The decoder that produced those files rendered the hard sign `Ъ` with the
//! glyph of the soft sign `Ь`. Bulgarian only writes `Ь` before `О`, so every
//! `Ь` that is not followed by `О` is a corrupted `Ъ`. The pass works on raw
//! (upper-case) lines, before any tokenization or lower-casing.

use std::borrow::Cow;

const SOFT_SIGN: char = 'Ь';
const HARD_SIGN: char = 'Ъ';
const PROTECTED_NEXT: char = 'О';

/// Replace corrupted soft signs with hard signs, leaving `ЬО` untouched.
///
/// Idempotent: the output never contains a replaceable `Ь`.
#[must_use]
pub fn fix_soft_sign(line: &str) -> Cow<'_, str> {
    if !line.contains(SOFT_SIGN) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == SOFT_SIGN && chars.peek() != Some(&PROTECTED_NEXT) {
            out.push(HARD_SIGN);
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("|С.ГОРНО ВЬРШИЛО|", "|С.ГОРНО ВЪРШИЛО|")]
    #[case("БЬЛГАРИЯ", "БЪЛГАРИЯ")]
    #[case("ЛЬОЛИН", "ЛЬОЛИН")]
    #[case("ЛЬОЛИН ВЬРХ", "ЛЬОЛИН ВЪРХ")]
    #[case("КРАЙ Ь", "КРАЙ Ъ")]
    #[case("без промяна", "без промяна")]
    fn repairs_soft_sign(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fix_soft_sign(input), expected);
    }

    #[test]
    fn untouched_lines_are_borrowed() {
        assert!(matches!(fix_soft_sign("ВИДИН"), Cow::Borrowed(_)));
    }

    #[rstest]
    #[case("ЬО ЬЬО Ь ЬЬ")]
    #[case("ГЬОЛ ДЬЛГО")]
    fn repair_is_idempotent_and_keeps_protected_pair(#[case] input: &str) {
        let once = fix_soft_sign(input).into_owned();
        let twice = fix_soft_sign(&once).into_owned();
        assert_eq!(once, twice);
        assert_eq!(once.matches("ЬО").count(), input.matches("ЬО").count());
    }
}
