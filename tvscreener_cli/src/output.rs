use anyhow::Result;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use tvscreener_lib::format::format_value;
use tvscreener_lib::tvscreener_api::Field;
use tvscreener_lib::types::ScreenerResult;
use tvscreener_lib::FieldRef;

use crate::xml_output;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

/// The selected fields paired with the column each one was returned under.
///
/// Duplicate selections collapse to one column, matching the request.
pub struct ResultColumns {
    fields: Vec<FieldRef>,
    wire_names: Vec<String>,
}

impl ResultColumns {
    pub fn new(fields: &[FieldRef]) -> Self {
        let mut kept = Vec::with_capacity(fields.len());
        let mut wire_names: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields {
            let wire_name = field.wire_name();
            if !wire_names.iter().any(|w| *w == wire_name) {
                wire_names.push(wire_name.into_owned());
                kept.push(*field);
            }
        }
        Self {
            fields: kept,
            wire_names,
        }
    }

    pub fn wire_names(&self) -> &[String] {
        &self.wire_names
    }

    fn headers(&self) -> Vec<String> {
        let mut headers = vec!["Symbol".to_string()];
        headers.extend(self.fields.iter().map(column_header));
        headers
    }
}

/// `Price`, `Relative Strength Index (14) (1W)`, `Price [1]`.
fn column_header(field: &FieldRef) -> String {
    let label = field.base().label();
    match (field.interval(), field.history_index()) {
        (Some(interval), _) => format!("{} ({})", label, interval),
        (_, Some(index)) => format!("{} [{}]", label, index),
        _ => label.to_string(),
    }
}

fn build_formatted_rows(result: &ScreenerResult, columns: &ResultColumns) -> Vec<Vec<String>> {
    result
        .data
        .iter()
        .map(|row| {
            let mut cells = vec![row.symbol.clone()];
            cells.extend(columns.fields.iter().zip(&columns.wire_names).map(
                |(field, wire_name)| {
                    let value = row.get(wire_name).unwrap_or(&serde_json::Value::Null);
                    format_value(value, field.format())
                },
            ));
            cells
        })
        .collect()
}

fn build_result_table(result: &ScreenerResult, columns: &ResultColumns) -> Table {
    let mut builder = Builder::default();
    builder.push_record(columns.headers());
    for row in build_formatted_rows(result, columns) {
        builder.push_record(row);
    }
    builder.build()
}

fn raw_cell(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Tabled, Serialize)]
pub struct FieldRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Column")]
    #[serde(rename = "column")]
    wire_name: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "Intervals")]
    intervals: bool,
    #[tabled(rename = "History")]
    history: bool,
}

pub fn build_field_rows(fields: &[&'static Field]) -> Vec<FieldRow> {
    fields
        .iter()
        .map(|f| FieldRow {
            name: f.name().to_string(),
            label: f.label().to_string(),
            wire_name: f.wire_name().to_string(),
            format: f.format().to_string(),
            intervals: f.supports_interval(),
            history: f.supports_history(),
        })
        .collect()
}

// -- Scan results --

pub fn print_result_table(result: &ScreenerResult, columns: &ResultColumns) {
    println!("{}", build_result_table(result, columns));
}

pub fn print_result_markdown(result: &ScreenerResult, columns: &ResultColumns) {
    let mut table = build_result_table(result, columns);
    table.with(Style::markdown());
    println!("{}", table);
}

/// Raw values under their column names, one line per symbol.
pub fn print_result_csv(result: &ScreenerResult, columns: &ResultColumns) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(std::iter::once("symbol").chain(columns.wire_names.iter().map(String::as_str)))?;
    for row in &result.data {
        let cells = columns.wire_names.iter().map(|c| raw_cell(row.get(c)));
        wtr.write_record(std::iter::once(row.symbol.clone()).chain(cells))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_result_xml(result: &ScreenerResult, columns: &ResultColumns) -> Result<()> {
    println!("{}", xml_output::result_to_xml(result, &columns.wire_names)?);
    Ok(())
}

pub fn print_result(
    result: &ScreenerResult,
    columns: &ResultColumns,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => print_result_table(result, columns),
        OutputFormat::Markdown => print_result_markdown(result, columns),
        OutputFormat::Csv => print_result_csv(result, columns)?,
        OutputFormat::Xml => print_result_xml(result, columns)?,
        OutputFormat::Json => print_json(result),
    }
    Ok(())
}

// -- Field catalogs --

pub fn print_fields(rows: &[FieldRow], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Xml => println!("{}", xml_output::items_to_xml("fields", "field", rows)?),
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tvscreener_lib::tvscreener_api::{Interval, StockField};
    use tvscreener_lib::types::ScanResponse;

    use super::*;

    fn sample() -> (ScreenerResult, ResultColumns) {
        let fields = vec![
            FieldRef::from(StockField::NAME),
            FieldRef::from(StockField::PRICE),
            FieldRef::from(StockField::PRICE),
            FieldRef::from(StockField::VOLUME),
        ];
        let columns = ResultColumns::new(&fields);
        let response: ScanResponse = serde_json::from_value(json!({
            "totalCount": 2,
            "data": [
                {"s": "NASDAQ:AAPL", "d": ["AAPL", 150.2, 51234567]},
                {"s": "NYSE:JPM", "d": ["JPM", null, 9000000]}
            ]
        }))
        .unwrap();
        let result = ScreenerResult::from_scan(response, columns.wire_names());
        (result, columns)
    }

    #[test]
    fn duplicate_fields_share_a_column() {
        let (_, columns) = sample();
        assert_eq!(columns.wire_names(), ["name", "close", "volume"]);
        assert_eq!(columns.headers()[0], "Symbol");
        assert_eq!(columns.headers().len(), 4);
    }

    #[test]
    fn headers_describe_variants() {
        let interval = StockField::PRICE.with_interval(Interval::Week).unwrap();
        let history = StockField::PRICE.with_history(1).unwrap();
        let label = StockField::PRICE.label();
        assert_eq!(column_header(&FieldRef::from(StockField::PRICE)), label);
        assert_eq!(column_header(&interval), format!("{} (1W)", label));
        assert_eq!(column_header(&history), format!("{} [1]", label));
    }

    #[test]
    fn rows_are_formatted_by_field() {
        let (result, columns) = sample();
        let rows = build_formatted_rows(&result, &columns);
        assert_eq!(rows[0], ["NASDAQ:AAPL", "AAPL", "$150.20", "51,234,567"]);
        assert_eq!(rows[1][2], "—");
    }

    #[test]
    fn markdown_table_has_header_and_rows() {
        let (result, columns) = sample();
        let mut table = build_result_table(&result, &columns);
        table.with(Style::markdown());
        let rendered = table.to_string();
        assert!(rendered.contains("| Symbol"));
        assert!(rendered.contains("NYSE:JPM"));
        assert_eq!(rendered.lines().count(), 4);
    }

    #[test]
    fn raw_cells() {
        assert_eq!(raw_cell(None), "");
        assert_eq!(raw_cell(Some(&json!(null))), "");
        assert_eq!(raw_cell(Some(&json!("AAPL"))), "AAPL");
        assert_eq!(raw_cell(Some(&json!(150.2))), "150.2");
    }

    #[test]
    fn field_rows_serialize_with_tag_safe_names() {
        let rows = build_field_rows(&[StockField::PRICE]);
        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["name"], "PRICE");
        assert_eq!(value["column"], "close");
        assert_eq!(value["format"], "currency");
    }
}
