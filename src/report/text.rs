//! Plain-text document sink: bordered ASCII tables, one per section

use super::document::{Document, Table};

/// Lay out a document as printable ASCII text
pub fn render_text(doc: &Document) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", doc.title));
    out.push_str(&format!("{}\n", "=".repeat(doc.title.len())));
    out.push_str(&format!("Patient ID: {}\n", doc.patient_id));
    out.push_str(&format!("Generated:  {}\n", doc.generated_at));

    for section in &doc.sections {
        out.push_str(&format!("\n{}. {}\n\n", section.number, section.heading));
        match &section.table {
            Table::KeyValue {
                key_header,
                value_header,
                rows,
            } => {
                let header = vec![key_header.clone(), value_header.clone()];
                let body: Vec<Vec<String>> =
                    rows.iter().map(|(k, v)| vec![k.clone(), v.clone()]).collect();
                out.push_str(&format_table(&header, &body));
            }
            Table::Grid { columns, rows } => {
                out.push_str(&format_table(columns, rows));
            }
        }
    }

    if let Some(block) = &doc.warnings {
        out.push_str(&format!("\n{}\n", block.heading));
        for line in &block.lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

fn format_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let border = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let format_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&format!(" {:<width$} |", cell, width = w));
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push_str(&format_row(header));
    out.push_str(&border);
    for row in rows {
        out.push_str(&format_row(row.as_slice()));
    }
    out.push_str(&border);
    out
}
