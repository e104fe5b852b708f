use lab_core::paging::Pager;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod rows;
pub mod table;

pub use rows::Tabular;

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
        theme: prefs.theme,
    }
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print one entity: a key/value table, or the entity as JSON.
pub fn output_entity<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(value, format);
    }
    let rows = value
        .row()
        .into_iter()
        .map(|(key, cell)| vec![key.to_string(), cell])
        .collect::<Vec<_>>();
    println!("{}", table::render_table(&["field", "value"], &rows, table_options()));
    Ok(())
}

/// One page of a list as the JSON formats see it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<'a, T> {
    pub items: &'a [T],
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub page_count: u32,
}

impl<'a, T> Listing<'a, T> {
    pub const fn new(items: &'a [T], pager: &Pager) -> Self {
        Self {
            items,
            page_number: pager.page_number(),
            page_size: pager.page_size(),
            total_count: pager.total_count(),
            page_count: pager.page_count(),
        }
    }
}

/// Render one page of a list. Tables get a pager footer.
pub fn render_page<T: Serialize + Tabular>(
    items: &[T],
    pager: &Pager,
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(&Listing::new(items, pager), format);
    }
    if items.is_empty() {
        return Ok(format!("(no rows)\n{}", pager.summary()));
    }
    let rows = items.iter().map(Tabular::row).collect::<Vec<_>>();
    let headers = rows[0].iter().map(|(key, _)| *key).collect::<Vec<_>>();
    let cells = rows
        .into_iter()
        .map(|row| row.into_iter().map(|(_, cell)| cell).collect::<Vec<String>>())
        .collect::<Vec<_>>();
    let mut rendered = table::render_table(&headers, &cells, table_options());
    rendered.push('\n');
    rendered.push_str(&pager.summary());
    Ok(rendered)
}

pub fn output_page<T: Serialize + Tabular>(
    items: &[T],
    pager: &Pager,
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("{}", render_page(items, pager, format)?);
    Ok(())
}

/// Table form of an arbitrary response: objects become field/value rows,
/// arrays of objects get one column per key in first-seen order.
fn render_value_table(value: &Value) -> anyhow::Result<String> {
    let options = table_options();
    let rendered = match value {
        Value::Object(fields) => {
            let rows: Vec<Vec<String>> = fields
                .iter()
                .map(|(field, cell)| vec![field.clone(), cell_text(cell)])
                .collect();
            table::render_table(&["field", "value"], &rows, options)
        }
        Value::Array(items) if items.is_empty() => "(no rows)".to_string(),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            object_columns(items, options)
        }
        Value::Array(items) => {
            let rows: Vec<Vec<String>> = items.iter().map(|item| vec![cell_text(item)]).collect();
            table::render_table(&["value"], &rows, options)
        }
        scalar => table::render_table(&["value"], &[vec![cell_text(scalar)]], options),
    };
    Ok(rendered)
}

fn object_columns(items: &[Value], options: table::TableOptions) -> String {
    let objects: Vec<&serde_json::Map<String, Value>> =
        items.iter().filter_map(Value::as_object).collect();
    let mut columns: Vec<&str> = Vec::new();
    for key in objects.iter().flat_map(|object| object.keys()) {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }
    let rows: Vec<Vec<String>> = objects
        .iter()
        .map(|object| {
            columns
                .iter()
                .map(|column| object.get(*column).map_or_else(|| "-".to_string(), cell_text))
                .collect()
        })
        .collect();
    table::render_table(&columns, &rows, options)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use lab_core::paging::{Page, Pager};
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::{Tabular, render, render_page};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Flask {
        id: &'static str,
        samples: u32,
    }

    impl Tabular for Flask {
        fn row(&self) -> Vec<(&'static str, String)> {
            vec![("id", self.id.to_string()), ("samples", self.samples.to_string())]
        }
    }

    fn pager(total: u64, pages: u32) -> Pager {
        let mut pager = Pager::new(2);
        pager.observe(&Page::<()> {
            data: vec![],
            total_count: total,
            page_count: pages,
        });
        pager
    }

    #[test]
    fn json_is_pretty_and_raw_is_one_line() {
        let flask = Flask { id: "f-1", samples: 12 };
        let pretty = render(&flask, OutputFormat::Json).unwrap();
        let raw = render(&flask, OutputFormat::Raw).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(raw, r#"{"id":"f-1","samples":12}"#);
    }

    #[test]
    fn object_response_renders_field_rows() {
        let response = serde_json::json!({ "id": "n-4", "read": true, "note": null });
        let out = render(&response, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("field"));
        assert!(lines.contains(&"read   true"));
        assert!(lines.iter().any(|line| line.starts_with("note") && line.ends_with('-')));
    }

    #[test]
    fn array_response_gets_union_of_columns() {
        let response = serde_json::json!([{ "id": "a" }, { "id": "b", "stage": "Callus" }]);
        let out = render(&response, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("id") && lines[0].ends_with("stage"));
        assert!(lines[2].ends_with('-'));
        assert!(lines[3].ends_with("Callus"));
    }

    #[test]
    fn page_table_keeps_row_order_and_adds_footer() {
        let items = [Flask { id: "b", samples: 2 }, Flask { id: "a", samples: 1 }];
        let out = render_page(&items, &pager(3, 2), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("id"));
        assert!(lines[2].starts_with('b'));
        assert!(lines[3].starts_with('a'));
        assert_eq!(lines[4], "page 1/2 (3 total)");
    }

    #[test]
    fn page_json_carries_paging_fields() {
        let items = [Flask { id: "a", samples: 1 }];
        let out = render_page(&items, &pager(3, 2), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["items"][0]["id"], "a");
        assert_eq!(parsed["totalCount"], 3);
        assert_eq!(parsed["pageCount"], 2);
        assert_eq!(parsed["pageNumber"], 1);
    }

    #[test]
    fn empty_page_still_reports_position() {
        let items: [Flask; 0] = [];
        let out = render_page(&items, &pager(0, 0), OutputFormat::Table).unwrap();
        assert_eq!(out, "(no rows)\npage 1/1 (0 total)");
    }
}
