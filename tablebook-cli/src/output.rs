//! Record output in table, JSON, CSV and TSV formats.
//!
//! Every listing command renders through [`print_records`], so all of them
//! share the same column conventions: uppercase headers for the human
//! table, lowercase headers for CSV/TSV, and the serde shape for JSON.

use crate::error::CliError;
use crate::utils::{format_instant, format_timestamp};
use serde::Serialize;
use std::io::Write;
use tablebook::config::OutputFormat;
use tablebook::{Reservation, Restaurant, Table, User};

/// A record that can be rendered as a row.
pub trait Tabular: Serialize {
    /// Column headers, in row order.
    const HEADERS: &'static [&'static str];

    /// Cell values, in header order. Missing values are empty strings.
    fn cells(&self) -> Vec<String>;
}

impl Tabular for User {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "email",
        "first_name",
        "last_name",
        "phone",
        "role",
        "created_at",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.email().to_string(),
            self.first_name().to_string(),
            self.last_name().to_string(),
            self.phone().unwrap_or_default().to_string(),
            self.role().to_string(),
            format_timestamp(self.created_at()),
        ]
    }
}

impl Tabular for Restaurant {
    const HEADERS: &'static [&'static str] =
        &["id", "name", "opens", "closes", "address", "created_at"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name().to_string(),
            self.hours().opening().format("%H:%M").to_string(),
            self.hours().closing().format("%H:%M").to_string(),
            self.address().map(ToString::to_string).unwrap_or_default(),
            format_timestamp(self.created_at()),
        ]
    }
}

impl Tabular for Table {
    const HEADERS: &'static [&'static str] = &["id", "restaurant_id", "number", "capacity"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.restaurant_id().to_string(),
            self.number().to_string(),
            self.capacity().to_string(),
        ]
    }
}

impl Tabular for Reservation {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "table_id",
        "user_id",
        "reserved_for",
        "party_size",
        "status",
        "special_request",
        "created_at",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.table_id().to_string(),
            self.user_id().to_string(),
            format_instant(self.reserved_for()),
            self.party_size().to_string(),
            self.status().to_string(),
            self.special_request().unwrap_or_default().to_string(),
            format_timestamp(self.created_at()),
        ]
    }
}

/// Writes `records` to stdout in the requested format.
pub fn print_records<T: Tabular>(format: OutputFormat, records: &[T]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_records(&mut handle, format, records)
}

/// Writes `records` to `out` in the requested format.
pub fn write_records<T: Tabular>(
    out: &mut impl Write,
    format: OutputFormat,
    records: &[T],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => write_table(out, records),
        OutputFormat::Json => write_json(out, records),
        OutputFormat::Csv => write_delimited(out, records, b','),
        OutputFormat::Tsv => write_delimited(out, records, b'\t'),
    }
}

fn write_table<T: Tabular>(out: &mut impl Write, records: &[T]) -> Result<(), CliError> {
    let header_line = T::HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for record in records {
        let cells: Vec<String> = record
            .cells()
            .into_iter()
            .map(|cell| if cell.is_empty() { "-".to_string() } else { cell })
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }

    Ok(())
}

fn write_json<T: Tabular>(out: &mut impl Write, records: &[T]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)?;
    Ok(())
}

fn write_delimited<T: Tabular>(
    out: &mut impl Write,
    records: &[T],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.write_record(record.cells())?;
    }

    writer.flush()?;
    Ok(())
}
