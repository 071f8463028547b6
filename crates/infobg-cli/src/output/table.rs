//! Plain-text tables and field blocks, sized by character count so that
//! Cyrillic cells line up.

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const GAP: &str = "  ";
const MIN_WIDTH: usize = 4;

/// Render `rows` under `headers`. Counts are right-aligned.
#[must_use]
pub fn render_rows(headers: &[String], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(String::as_str)
                .map(width)
                .chain([width(header)])
                .max()
                .unwrap_or(0)
        })
        .collect();
    if let Some(max_width) = options.max_width {
        shrink(&mut widths, max_width);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers, &widths, false));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(GAP),
    );
    for row in rows {
        lines.push(line(row, &widths, options.color));
    }
    lines.join("\n")
}

/// Render `key  value` lines with the keys padded to one column.
#[must_use]
pub fn render_fields(fields: &[(String, String)]) -> String {
    let key_width = fields.iter().map(|(key, _)| width(key)).max().unwrap_or(0);
    fields
        .iter()
        .map(|(key, value)| format!("{key}{}{GAP}{value}", " ".repeat(key_width - width(key))))
        .collect::<Vec<_>>()
        .join("\n")
}

fn line(cells: &[String], widths: &[usize], color: bool) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(index, &w)| {
            let text = fit(cells.get(index).map_or("-", String::as_str), w);
            let pad = " ".repeat(w.saturating_sub(width(&text)));
            let shown = if color { paint(&text) } else { text.clone() };
            if is_count(&text) {
                format!("{pad}{shown}")
            } else {
                format!("{shown}{pad}")
            }
        })
        .collect::<Vec<_>>()
        .join(GAP)
}

/// Narrow the widest column one character at a time until a row fits.
fn shrink(widths: &mut [usize], max_width: usize) {
    let gaps = GAP.len() * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some(widest) = widths.iter_mut().filter(|w| **w > MIN_WIDTH).max_by_key(|w| **w) else {
            break;
        };
        *widest -= 1;
    }
}

fn fit(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn is_count(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit())
}

fn paint(text: &str) -> String {
    let code = match text {
        "match" | "true" => "32",
        "name_conflict" | "value_conflict" => "33",
        "false" => "31",
        _ => return text.to_string(),
    };
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
