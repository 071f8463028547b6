//! Folding of raw labels into lookup keys.

use infobg_core::enums::SettlementKind;

/// Phrases that some table editions append to district/municipality header
/// lines. Compared against folded text.
pub const HEADER_SUFFIXES: &[&str] = &[
    "т а б л и ц а",
    "на населението по постоянен и настоящ адрес",
    "на населението по адрес и местожителство",
];

/// Settlement-kind markers in the order they are tried.
const KIND_PREFIXES: &[(&str, SettlementKind)] = &[
    ("с.", SettlementKind::Village),
    ("гр.", SettlementKind::Town),
    ("ман.", SettlementKind::Monastery),
];

fn is_delimiter_noise(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '|' | '!' | ':' | ';' | ',')
}

/// Lower-case, trim delimiter noise from both ends, and collapse internal
/// whitespace runs to a single space.
///
/// This is the only normalization applied before exact matching: catalog
/// keys and alias entries go through it too.
#[must_use]
pub fn fold(raw: &str) -> String {
    let trimmed = raw.trim_matches(is_delimiter_noise);
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_space = false;
    for ch in trimmed.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out
}

/// Split a folded settlement label into its kind marker and bare name.
#[must_use]
pub fn strip_kind_prefix(folded: &str) -> (Option<SettlementKind>, &str) {
    for (prefix, kind) in KIND_PREFIXES {
        if let Some(rest) = folded.strip_prefix(prefix) {
            return (Some(*kind), rest.trim_start());
        }
    }
    (None, folded)
}

/// Remove any known trailing header phrase from a folded line.
#[must_use]
pub fn strip_header_suffix(folded: &str) -> &str {
    let mut current = folded.trim_end();
    loop {
        let before = current;
        for suffix in HEADER_SUFFIXES {
            if let Some(rest) = current.strip_suffix(suffix) {
                current = rest.trim_end();
            }
        }
        if current.len() == before.len() {
            return current;
        }
    }
}
