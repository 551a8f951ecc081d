//! Spreadsheet ingest and normalization.
//!
//! This module turns a raw grid of cells (row 0 = header) into a clean,
//! chronologically sorted series of weekly index records.
//!
//! Design goals:
//! - **Alias-based header matching** (exact, case/whitespace-insensitive)
//! - **Strict validation**: the first bad date or value rejects the file
//! - **Deterministic behavior** (fixed separator order, fixed date formats)
//! - **Separation of concerns**: no I/O and no derived-series math here

use chrono::NaiveDate;

use crate::domain::{Cell, Record};
use crate::error::UploadError;

/// Accepted header labels for the date-range column.
pub const DATE_RANGE_ALIASES: &[&str] = &["date range", "日期"];

/// Accepted header labels for the index-value column.
pub const INDEX_VALUE_ALIASES: &[&str] = &["ccl index value", "中原城市領先指數", "ccl index"];

/// Range separators, tried in this order with early exit. The third entry is
/// an en dash, common in Chinese-language exports.
const RANGE_SEPARATORS: &[&str] = &[" to ", " - ", "–", "~"];

/// Accepted end-date formats, tried in this order. Day-first for the
/// slash/dash forms; this keeps parsing deterministic regardless of locale.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Resolved zero-based column indices for the two required roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date_range: usize,
    pub index_value: usize,
}

/// Turn raw rows into a sorted series of records, or fail with a typed error.
///
/// Failure semantics are strict: the first `InvalidDate` or `InvalidValue`
/// aborts the whole ingestion and no partial series is returned. Structural
/// failures (`EmptyInput`, `MissingColumns`, `NoValidRows`) likewise abort.
pub fn ingest(rows: &[Vec<Cell>]) -> Result<Vec<Record>, UploadError> {
    if rows.len() < 2 {
        return Err(UploadError::EmptyInput);
    }

    let columns = resolve_columns(&rows[0])?;

    let mut records = Vec::new();
    for (idx, row) in rows.iter().enumerate().skip(1) {
        if row.is_empty() {
            continue;
        }

        let raw_range = row
            .get(columns.date_range)
            .map(Cell::to_text)
            .unwrap_or_default()
            .trim()
            .to_string();
        if raw_range.is_empty() {
            continue;
        }

        let candidate = extract_end_date(&raw_range);
        let end_date = parse_end_date(&candidate).ok_or_else(|| UploadError::InvalidDate {
            row: idx + 1,
            raw: raw_range.clone(),
            candidate: candidate.clone(),
        })?;

        let value_cell = row.get(columns.index_value).cloned().unwrap_or(Cell::Empty);
        let value = value_cell
            .as_number()
            .ok_or_else(|| UploadError::InvalidValue {
                row: idx + 1,
                raw: value_cell.to_text(),
            })?;

        records.push(Record {
            original_range: raw_range,
            end_date,
            value,
        });
    }

    if records.is_empty() {
        return Err(UploadError::NoValidRows);
    }

    // Stable sort: ties keep their original input order.
    records.sort_by(|a, b| a.end_date.cmp(&b.end_date));
    Ok(records)
}

/// Resolve both column roles from the header row.
///
/// Matching is exact on the lower-cased, trimmed label; substring or fuzzy
/// matching is out of scope. Both roles must resolve to distinct columns.
pub fn resolve_columns(header: &[Cell]) -> Result<ColumnMap, UploadError> {
    let labels: Vec<String> = header.iter().map(|c| normalize_label(&c.to_text())).collect();

    let date_range = find_alias(&labels, DATE_RANGE_ALIASES);
    let index_value = find_alias(&labels, INDEX_VALUE_ALIASES);

    match (date_range, index_value) {
        (Some(date_range), Some(index_value)) if date_range != index_value => Ok(ColumnMap {
            date_range,
            index_value,
        }),
        _ => Err(UploadError::MissingColumns),
    }
}

fn find_alias(labels: &[String], aliases: &[&str]) -> Option<usize> {
    labels.iter().position(|l| aliases.contains(&l.as_str()))
}

fn normalize_label(name: &str) -> String {
    // Excel exports sometimes prefix the first header cell with a UTF-8 BOM;
    // strip it so alias matching does not silently fail.
    name.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Reduce a date-range string to its end-date candidate.
///
/// Priority order:
/// 1. the first matching separator from [`RANGE_SEPARATORS`] splits the
///    string; the last non-empty trimmed segment wins and scanning stops
/// 2. if nothing matched and the string contains a hyphen (and does not start
///    with one): ≥6 hyphen segments is the `YYYY-MM-DD-YYYY-MM-DD` form and
///    the end date is rebuilt from the last three segments; otherwise the
///    last segment wins
/// 3. otherwise the raw string itself (a single date, no range)
///
/// The 6-segment rule assumes the end date occupies the last three segments;
/// that layout assumption is inherited from the source data and deliberately
/// not second-guessed here.
pub fn extract_end_date(raw: &str) -> String {
    let mut candidate = raw.to_string();

    for sep in RANGE_SEPARATORS {
        if raw.contains(sep) {
            if let Some(last) = raw.split(sep).map(str::trim).filter(|s| !s.is_empty()).last() {
                candidate = last.to_string();
            }
            break;
        }
    }

    if candidate == raw && raw.contains('-') && !raw.starts_with('-') {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() >= 6 {
            candidate = parts[parts.len() - 3..].join("-").trim().to_string();
        } else if let Some(last) = parts.last() {
            candidate = last.trim().to_string();
        }
    }

    candidate
}

/// Parse an end-date candidate against the fixed format list.
pub fn parse_end_date(candidate: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
}
