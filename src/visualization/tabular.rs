//! Comma- and tab-separated struct listings.
//!
//! Each struct becomes a block: its name on one line, a header row, then one
//! row per field. Blocks are separated by a blank line.
use crate::graph::{FieldInfo, StructInfo, WorkingSet};

const CSV_HEADER: &str = "Name,Type,Tag,Comment";
const TSV_HEADER: &str = "Name\tType\tTag\tComment";

/// Quote a value and double any quotes inside it.
#[must_use]
pub fn escape_csv(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Replace newlines and tabs with a single space.
#[must_use]
pub fn escape_tsv(s: &str) -> String {
    s.replace('\n', " ").replace('\t', " ")
}

#[derive(Debug, Default)]
pub struct CsvGenerator;

impl CsvGenerator {
    #[must_use]
    pub fn new() -> Self { Self {} }

    #[must_use]
    pub fn block(&self, info: &StructInfo) -> String {
        let mut s = escape_csv(&info.name);
        s.push('\n');
        s.push_str(CSV_HEADER);
        s.push('\n');
        for field in &info.fields {
            let row = [&field.name, &field.type_text, &field.tag, &field.comment]
                .map(|v| escape_csv(v))
                .join(",");
            s.push_str(&row);
            s.push('\n');
        }
        s
    }

    #[must_use]
    pub fn generate(&self, set: &WorkingSet) -> String {
        set.iter().map(|info| self.block(info) + "\n").collect()
    }
}

#[derive(Debug, Default)]
pub struct TsvGenerator;

impl TsvGenerator {
    #[must_use]
    pub fn new() -> Self { Self {} }

    #[must_use]
    pub fn block(&self, info: &StructInfo) -> String {
        let mut s = escape_tsv(&info.name);
        s.push('\n');
        s.push_str(TSV_HEADER);
        s.push('\n');
        for field in &info.fields {
            let row = [&field.name, &field.type_text, &field.tag, &field.comment]
                .map(|v| escape_tsv(v))
                .join("\t");
            s.push_str(&row);
            s.push('\n');
        }
        s
    }

    #[must_use]
    pub fn generate(&self, set: &WorkingSet) -> String {
        set.iter().map(|info| self.block(info) + "\n").collect()
    }
}

/// Read one CSV block produced by [`CsvGenerator::block`] back into a struct.
///
/// Returns `None` if the block is missing its name or header, or a row does not have four values.
#[must_use]
pub fn parse_csv_block(block: &str) -> Option<StructInfo> {
    let mut records = split_csv_records(block).into_iter();
    let name = records.next()?.into_iter().next()?;
    let header = records.next()?;
    if header.join(",") != CSV_HEADER {
        return None;
    }
    let mut fields = Vec::new();
    for record in records {
        let [name, type_text, tag, comment]: [String; 4] = record.try_into().ok()?;
        fields.push(FieldInfo { name, type_text, tag, comment });
    }
    Some(StructInfo { name, fields })
}

// Quoted values may span lines; quotes inside them are doubled.
fn split_csv_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut value = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    value.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => value.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut value)),
            '\n' => {
                record.push(std::mem::take(&mut value));
                records.push(std::mem::take(&mut record));
            }
            '\r' => {}
            _ => value.push(c),
        }
    }
    if !value.is_empty() || !record.is_empty() {
        record.push(value);
        records.push(record);
    }
    records
}
