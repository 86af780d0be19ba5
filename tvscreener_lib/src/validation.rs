//! Parsing and validation of user-supplied query text.
//!
//! Everything here turns loose strings (CLI flags, JSON arguments) into the
//! typed values of `tvscreener_api`, failing with
//! [`ScreenerError::InvalidInput`] or a wrapped builder error.

use serde_json::Value;
use tvscreener_api::{
    Catalog, CatalogId, Comparisons, Field, FieldCondition, FieldRef, Interval,
};

use crate::error::ScreenerError;

pub const MAX_FIELD_SPEC_LENGTH: usize = 120;
pub const MAX_CONDITION_LENGTH: usize = 500;
/// Largest result window the scanner serves in one request.
pub const MAX_PAGE_SIZE: u32 = 5000;

const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Validate a catalog name: `stock`/`stocks`, `crypto`, `forex`, `futures`.
pub fn parse_catalog(input: &str) -> Result<CatalogId, ScreenerError> {
    input.trim().parse::<CatalogId>().map_err(|_| {
        ScreenerError::invalid(format!(
            "unknown catalog '{}'. Valid values: stock, crypto, forex, futures",
            input
        ))
    })
}

/// Resolve `NAME`, a wire name, `NAME|1D`, or `NAME[2]` against a catalog.
///
/// The base may be given as the catalog key (case-insensitive) or the exact
/// wire name. A whole-name match wins over suffix parsing, so catalog wire
/// names such as `ADX+DI[1]` resolve to their own field.
pub fn resolve_field(catalog: CatalogId, spec: &str) -> Result<FieldRef, ScreenerError> {
    if spec.len() > MAX_FIELD_SPEC_LENGTH {
        return Err(ScreenerError::invalid(format!(
            "field name exceeds maximum length of {} bytes",
            MAX_FIELD_SPEC_LENGTH
        )));
    }
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ScreenerError::invalid("field name is empty"));
    }
    if let Some(field) = find_field(&Catalog::get(catalog), spec) {
        return Ok(field.into());
    }

    if let Some(rest) = spec.strip_suffix(']') {
        let (base, index) = rest.rsplit_once('[').ok_or_else(|| {
            ScreenerError::invalid(format!("unbalanced history index in '{}'", spec))
        })?;
        let index = index.trim().parse::<i64>().map_err(|_| {
            ScreenerError::invalid(format!("history index in '{}' is not an integer", spec))
        })?;
        let field = lookup_field(catalog, base)?;
        return Ok(field.with_history(index)?);
    }

    if let Some((base, interval)) = spec.rsplit_once('|') {
        let interval = interval.trim().parse::<Interval>()?;
        let field = lookup_field(catalog, base)?;
        return Ok(field.with_interval(interval)?);
    }

    Ok(lookup_field(catalog, spec)?.into())
}

fn lookup_field(catalog: CatalogId, name: &str) -> Result<&'static Field, ScreenerError> {
    let name = name.trim();
    let fields = Catalog::get(catalog);
    if let Some(field) = find_field(&fields, name) {
        return Ok(field);
    }
    let mut msg = format!("unknown {} field '{}'", catalog, name);
    if let Some(suggestion) = suggest_field(&fields, name) {
        msg.push_str(&format!(". Did you mean {}?", suggestion.name()));
    }
    Err(ScreenerError::invalid(msg))
}

fn find_field(catalog: &Catalog, name: &str) -> Option<&'static Field> {
    catalog.field(name).or_else(|| catalog.by_wire_name(name))
}

/// Closest catalog key by Jaro-Winkler similarity, if any is close enough.
fn suggest_field(catalog: &Catalog, name: &str) -> Option<&'static Field> {
    let wanted = name.to_ascii_uppercase();
    let mut best: Option<(f64, &'static Field)> = None;
    for &field in catalog.fields() {
        let score = strsim::jaro_winkler(&wanted, field.name());
        if score < SUGGESTION_THRESHOLD {
            continue;
        }
        match best {
            Some((best_score, _)) if best_score >= score => {}
            _ => best = Some((score, field)),
        }
    }
    best.map(|(_, field)| field)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TextOperator {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Equal,
    NotEqual,
    Match,
    NotMatch,
}

/// Comparison operators accepted in condition text, longest first.
const OPERATORS: &[(&str, TextOperator)] = &[
    (">=", TextOperator::GreaterOrEqual),
    ("<=", TextOperator::LessOrEqual),
    ("!=", TextOperator::NotEqual),
    ("!~", TextOperator::NotMatch),
    (">", TextOperator::Greater),
    ("<", TextOperator::Less),
    ("=", TextOperator::Equal),
    ("~", TextOperator::Match),
];

fn operator_list() -> String {
    OPERATORS
        .iter()
        .map(|(symbol, _)| *symbol)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse `FIELD op VALUE` into a condition on `catalog`.
///
/// Operators: `>`, `>=`, `<`, `<=`, `=`, `!=`, `~` (match), `!~` (no match).
/// `FIELD=a..b` is a range, `FIELD!=a..b` its negation, and `FIELD=a,b,c`
/// (or `!=`) a set membership test.
pub fn parse_condition(catalog: CatalogId, expr: &str) -> Result<FieldCondition, ScreenerError> {
    if expr.len() > MAX_CONDITION_LENGTH {
        return Err(ScreenerError::invalid(format!(
            "condition exceeds maximum length of {} bytes",
            MAX_CONDITION_LENGTH
        )));
    }
    let start = expr
        .find(|c| matches!(c, '<' | '>' | '=' | '!' | '~'))
        .ok_or_else(|| {
            ScreenerError::invalid(format!(
                "no operator in '{}'. Expected FIELD op VALUE with one of: {}",
                expr,
                operator_list()
            ))
        })?;
    let (field_spec, rest) = expr.split_at(start);
    let (symbol, op) = OPERATORS
        .iter()
        .find(|(symbol, _)| rest.starts_with(symbol))
        .copied()
        .ok_or_else(|| ScreenerError::invalid(format!("unknown operator in '{}'", expr)))?;
    let raw = rest[symbol.len()..].trim();
    if raw.is_empty() {
        return Err(ScreenerError::invalid(format!("missing value in '{}'", expr)));
    }

    let field = resolve_field(catalog, field_spec)?;
    let condition = match op {
        TextOperator::Greater => field.gt(parse_value(raw)),
        TextOperator::GreaterOrEqual => field.gte(parse_value(raw)),
        TextOperator::Less => field.lt(parse_value(raw)),
        TextOperator::LessOrEqual => field.lte(parse_value(raw)),
        TextOperator::Match => field.matches(parse_value(raw)),
        TextOperator::NotMatch => field.not_matches(parse_value(raw)),
        TextOperator::Equal | TextOperator::NotEqual => {
            let negated = op == TextOperator::NotEqual;
            if let Some((low, high)) = raw.split_once("..") {
                let (low, high) = (parse_value(low), parse_value(high));
                if negated {
                    field.not_between(low, high)
                } else {
                    field.between(low, high)
                }
            } else if raw.contains(',') {
                let values = raw.split(',').map(parse_value);
                if negated {
                    field.not_in(values)
                } else {
                    field.isin(values)
                }
            } else if negated {
                field.not_equal(parse_value(raw))
            } else {
                field.equal(parse_value(raw))
            }
        }
    }?;
    Ok(condition)
}

/// Booleans, integers, and floats are typed; anything else is text.
/// Surrounding single or double quotes force text.
pub fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return Value::from(inner);
        }
    }
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(n) = raw.parse::<f64>() {
        if n.is_finite() {
            return Value::from(n);
        }
    }
    Value::from(raw)
}

/// Validate a result window `[from, to)`.
pub fn validate_range(from: u32, to: u32) -> Result<[u32; 2], ScreenerError> {
    if from >= to {
        return Err(ScreenerError::invalid(format!(
            "range start {} must be below range end {}",
            from, to
        )));
    }
    if to - from > MAX_PAGE_SIZE {
        return Err(ScreenerError::invalid(format!(
            "range covers {} rows; at most {} per request",
            to - from,
            MAX_PAGE_SIZE
        )));
    }
    Ok([from, to])
}

/// Window for `limit` rows after skipping `offset`.
pub fn page_range(offset: u32, limit: u32) -> Result<[u32; 2], ScreenerError> {
    let to = offset
        .checked_add(limit)
        .ok_or_else(|| ScreenerError::invalid("offset + limit overflows"))?;
    validate_range(offset, to)
}
