//! Rendering of command responses.
//!
//! JSON and raw modes print the response as serialized. Table mode splits an
//! object response into a field block, with nested objects flattened to
//! dotted keys, followed by one table per list of records. A census summary
//! prints its counters, then its files, then its conflicts.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{TableOptions, render_fields, render_rows};

/// Columns that lead a table when present; the rest follow by name.
const LEADING_COLUMNS: [&str; 8] = [
    "code",
    "abbrev",
    "name",
    "kind",
    "municipality",
    "district",
    "date",
    "file",
];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?, table_options())),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value, options: TableOptions) -> String {
    match value {
        Value::Array(items) => records(items, options),
        Value::Object(map) => sections(map, options),
        scalar => cell(scalar),
    }
}

/// A response object: its own fields first, then each list of records.
fn sections(map: &Map<String, Value>, options: TableOptions) -> String {
    let mut fields = Vec::new();
    let mut lists = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) if items.iter().any(Value::is_object) || items.is_empty() => {
                lists.push((key, items));
            }
            _ => flatten(key, value, &mut fields),
        }
    }
    fields.sort_by(|a, b| column_rank(&a.0).cmp(&column_rank(&b.0)));

    let mut blocks = Vec::new();
    if !fields.is_empty() {
        blocks.push(render_fields(&fields));
    }
    for (key, items) in lists {
        blocks.push(format!("{key} ({})\n{}", items.len(), records(items, options)));
    }
    blocks.join("\n\n")
}

fn records(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(none)");
    }

    let rows: Vec<Vec<(String, String)>> = items
        .iter()
        .map(|item| {
            let mut cells = Vec::new();
            flatten(if item.is_object() { "" } else { "value" }, item, &mut cells);
            cells
        })
        .collect();

    let mut headers: Vec<String> = Vec::new();
    for (key, _) in rows.iter().flatten() {
        if !headers.contains(key) {
            headers.push(key.clone());
        }
    }
    headers.sort_by(|a, b| column_rank(a).cmp(&column_rank(b)));

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    row.iter()
                        .find(|(key, _)| key == header)
                        .map_or_else(|| String::from("-"), |(_, value)| value.clone())
                })
                .collect()
        })
        .collect();

    render_rows(&headers, &cells, options)
}

fn column_rank(header: &str) -> (usize, &str) {
    let rank = LEADING_COLUMNS
        .iter()
        .position(|leading| *leading == header)
        .unwrap_or(LEADING_COLUMNS.len());
    (rank, header)
}

/// Flatten `value` into `(dotted key, cell)` pairs.
fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, nested, out);
            }
        }
        other => out.push((prefix.to_string(), cell(other))),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(compact).collect::<Vec<_>>().join("; "),
        other => other.to_string(),
    }
}

/// A record nested inside a cell. Field diffs read `current: 700 -> 650`.
fn compact(value: &Value) -> String {
    let Value::Object(map) = value else {
        return cell(value);
    };
    match (map.get("field"), map.get("existing"), map.get("incoming")) {
        (Some(field), Some(existing), Some(incoming)) => format!(
            "{}: {} -> {}",
            cell(field),
            cell(existing),
            cell(incoming)
        ),
        _ => map
            .iter()
            .map(|(key, nested)| format!("{key}={}", cell(nested)))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    struct Settlement {
        name: &'static str,
        code: &'static str,
        altitude: u32,
    }

    #[test]
    fn json_and_raw_keep_the_serialized_shape() {
        let value = vec![Settlement {
            name: "Арчар",
            code: "29129",
            altitude: 40,
        }];

        let pretty = render(&value, OutputFormat::Json).unwrap();
        let raw = render(&value, OutputFormat::Raw).unwrap();

        assert!(!raw.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(parsed, serde_json::from_str::<serde_json::Value>(&raw).unwrap());
        assert_eq!(parsed[0]["code"], "29129");
    }

    #[test]
    fn record_tables_lead_with_identity_columns() {
        let value = serde_json::to_value(vec![Settlement {
            name: "Горно Вършило",
            code: "12348",
            altitude: 300,
        }])
        .unwrap();

        let table = render_table(&value, PLAIN);
        let header: Vec<&str> = table.lines().next().unwrap().split_whitespace().collect();

        assert_eq!(header, vec!["code", "name", "altitude"]);
        assert!(table.contains("Горно Вършило"));
    }

    #[test]
    fn summary_prints_fields_then_one_table_per_list() {
        let value = json!({
            "records": 2,
            "cached": false,
            "files": [{"file": "tadr2021.txt", "strict": true, "records": 2}],
            "conflicts": []
        });

        let out = render_table(&value, PLAIN);
        let blocks: Vec<&str> = out.split("\n\n").collect();

        assert_eq!(blocks[0], "cached   false\nrecords  2");
        assert_eq!(blocks[1], "conflicts (0)\n(none)");
        assert!(blocks[2].starts_with("files (1)\nfile"));
        assert!(blocks[2].contains("tadr2021.txt"));
    }

    #[test]
    fn nested_objects_flatten_to_dotted_keys() {
        let value = json!({
            "code": "12079",
            "labels": {"district": "видин", "municipality": "ружинци"}
        });

        let out = render_table(&value, PLAIN);

        assert!(out.lines().any(|line| line.starts_with("labels.district")));
        assert!(out.contains("ружинци"));
    }

    #[test]
    fn conflicts_show_field_diffs_inline() {
        let value = json!([{
            "code": "29129",
            "outcome": {
                "outcome": "value_conflict",
                "fields": [{"field": "current", "existing": "700", "incoming": "650"}]
            }
        }]);

        let out = render_table(&value, PLAIN);

        assert!(out.contains("outcome.fields"));
        assert!(out.contains("current: 700 -> 650"));
        assert!(out.contains("value_conflict"));
    }
}
