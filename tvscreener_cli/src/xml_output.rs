use std::io::Cursor;

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use serde_json::Value;

use tvscreener_lib::types::ScreenerResult;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn new_writer() -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

fn finish(writer: XmlWriter) -> Result<String> {
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Recursively write a JSON value as nested elements. Nulls are omitted.
fn write_value<W: std::io::Write>(writer: &mut Writer<W>, tag: &str, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for item in items {
                write_value(writer, "item", item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        scalar => {
            let text = scalar_text(scalar).unwrap_or_default();
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            writer.write_event(Event::Text(BytesText::new(&text)))?;
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
    }
    Ok(())
}

/// Serialize a slice of items whose field names are valid XML tags.
pub fn items_to_xml<T: Serialize>(root_tag: &str, item_tag: &str, items: &[T]) -> Result<String> {
    let mut writer = new_writer()?;
    if items.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(root_tag)))?;
        return finish(writer);
    }
    writer.write_event(Event::Start(BytesStart::new(root_tag)))?;
    for item in items {
        write_value(&mut writer, item_tag, &serde_json::to_value(item)?)?;
    }
    writer.write_event(Event::End(BytesEnd::new(root_tag)))?;
    finish(writer)
}

/// Scan results as `<scan>` with one `<row symbol=..>` per symbol.
///
/// Column names such as `RSI|1W` or `close[1]` are not valid tag names, so
/// each value is a `<column name=..>` element. Missing values are empty
/// elements.
pub fn result_to_xml(result: &ScreenerResult, columns: &[String]) -> Result<String> {
    let mut writer = new_writer()?;
    let total = result.total_count.to_string();
    let mut root = BytesStart::new("scan");
    root.push_attribute(("totalCount", total.as_str()));
    if result.data.is_empty() {
        writer.write_event(Event::Empty(root))?;
        return finish(writer);
    }
    writer.write_event(Event::Start(root))?;
    for row in &result.data {
        let mut start = BytesStart::new("row");
        start.push_attribute(("symbol", row.symbol.as_str()));
        writer.write_event(Event::Start(start))?;
        for column in columns {
            let mut cell = BytesStart::new("column");
            cell.push_attribute(("name", column.as_str()));
            match row.get(column).and_then(scalar_text) {
                Some(text) => {
                    writer.write_event(Event::Start(cell))?;
                    writer.write_event(Event::Text(BytesText::new(&text)))?;
                    writer.write_event(Event::End(BytesEnd::new("column")))?;
                }
                None => writer.write_event(Event::Empty(cell))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new("row")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("scan")))?;
    finish(writer)
}
