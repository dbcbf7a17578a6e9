use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::commands::{Envelope, Table};
use crate::error::CliError;

pub fn render(envelope: &Envelope, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => {
            writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
            writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
            writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;
            writeln!(out)?;
            write_table(&mut out, &envelope.table)?;
        }
    }

    Ok(())
}

fn write_table(out: &mut impl Write, table: &Table) -> io::Result<()> {
    if table.rows.is_empty() {
        return writeln!(out, "(no rows)");
    }

    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let header: Vec<String> = table.headers.iter().map(|h| h.to_string()).collect();
    write_row(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    write_row(out, &rule, &widths)?;
    for row in &table.rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}
