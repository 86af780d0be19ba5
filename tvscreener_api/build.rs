//! build.rs - Field catalog generation
//!
//! Reads the tab-separated field tables under `catalog/` and emits one
//! `<Kind>Field` type per table into `$OUT_DIR/catalog.rs`, with an associated
//! `&'static Field` constant per row plus an `ALL` slice.
//!
//! The build fails on malformed rows, duplicate keys, duplicate wire names,
//! unknown formats, or keys that are not valid constant identifiers, so a
//! table edit cannot silently produce a catalog that drifts from the screener
//! schema.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// (file stem, generated type, `CatalogId` variant)
const CATALOGS: &[(&str, &str, &str)] = &[
    ("stock", "StockField", "Stock"),
    ("crypto", "CryptoField", "Crypto"),
    ("forex", "ForexField", "Forex"),
    ("futures", "FuturesField", "Futures"),
];

const FORMATS: &[(&str, &str)] = &[
    ("float", "Float"),
    ("percent", "Percent"),
    ("bool", "Bool"),
    ("date", "Date"),
    ("text", "Text"),
    ("rating", "Rating"),
    ("number_group", "NumberGroup"),
    ("currency", "Currency"),
    ("round", "Round"),
    ("recommendation", "Recommendation"),
    ("computed_recommendation", "ComputedRecommendation"),
];

struct Row {
    name: String,
    label: String,
    wire_name: String,
    format: &'static str,
    interval: bool,
    history: bool,
}

fn main() {
    println!("cargo:rerun-if-changed=catalog");

    let mut out = String::new();
    for (stem, type_name, variant) in CATALOGS {
        let path = format!("catalog/{stem}.tsv");
        println!("cargo:rerun-if-changed={path}");
        let rows = parse_table(Path::new(&path));
        emit_catalog(&mut out, stem, type_name, variant, &rows);
    }

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out_dir).join("catalog.rs"), out).expect("write catalog.rs");
}

fn parse_table(path: &Path) -> Vec<Row> {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));

    let mut rows = Vec::new();
    let mut names = HashSet::new();
    let mut wire_names = HashSet::new();

    for (lineno, line) in text.lines().enumerate() {
        let lineno = lineno + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        assert!(
            cols.len() == 6,
            "{}:{lineno}: expected 6 tab-separated columns, found {}",
            path.display(),
            cols.len()
        );

        let name = cols[0].to_string();
        assert!(
            is_const_ident(&name),
            "{}:{lineno}: `{name}` is not a valid constant name",
            path.display()
        );
        assert!(
            names.insert(name.clone()),
            "{}:{lineno}: duplicate field key `{name}`",
            path.display()
        );
        let wire_name = cols[2].to_string();
        assert!(
            !wire_name.is_empty() && wire_names.insert(wire_name.clone()),
            "{}:{lineno}: duplicate or empty wire name `{wire_name}`",
            path.display()
        );

        let format = FORMATS
            .iter()
            .find(|(tag, _)| *tag == cols[3])
            .map(|(_, variant)| *variant)
            .unwrap_or_else(|| panic!("{}:{lineno}: unknown format `{}`", path.display(), cols[3]));

        rows.push(Row {
            name,
            label: cols[1].to_string(),
            wire_name,
            format,
            interval: parse_flag(path, lineno, cols[4]),
            history: parse_flag(path, lineno, cols[5]),
        });
    }
    rows
}

fn parse_flag(path: &Path, lineno: usize, value: &str) -> bool {
    match value {
        "true" => true,
        "false" => false,
        other => panic!("{}:{lineno}: expected true/false, found `{other}`", path.display()),
    }
}

fn is_const_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_uppercase() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && name != "ALL"
}

fn emit_catalog(out: &mut String, stem: &str, type_name: &str, variant: &str, rows: &[Row]) {
    let _ = writeln!(out, "/// Fields available to the {stem} screener.");
    let _ = writeln!(out, "#[derive(Debug, Clone, Copy)]");
    let _ = writeln!(out, "pub struct {type_name};");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl {type_name} {{");
    for row in rows {
        let _ = writeln!(out, "    #[doc = {:?}]", row.label);
        let _ = writeln!(out, "    pub const {}: &'static Field = &Field {{", row.name);
        let _ = writeln!(out, "        name: {:?},", row.name);
        let _ = writeln!(out, "        label: {:?},", row.label);
        let _ = writeln!(out, "        wire_name: {:?},", row.wire_name);
        let _ = writeln!(out, "        format: FieldFormat::{},", row.format);
        let _ = writeln!(out, "        interval: {},", row.interval);
        let _ = writeln!(out, "        history: {},", row.history);
        let _ = writeln!(out, "        catalog: CatalogId::{variant},");
        let _ = writeln!(out, "    }};");
    }
    let _ = writeln!(out, "    /// Every field in this catalog, in table order.");
    let _ = writeln!(out, "    pub const ALL: &'static [&'static Field] = &[");
    for row in rows {
        let _ = writeln!(out, "        Self::{},", row.name);
    }
    let _ = writeln!(out, "    ];");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
}
