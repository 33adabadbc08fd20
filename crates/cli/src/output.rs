//! Terminal output and prompts.

use std::io::{self, BufRead, Write};

use secrecy::SecretString;
use threadline_admin::components::ListView;
use threadline_core::FormErrors;

/// Print a list as aligned columns, or its empty state.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn list(out: &mut impl Write, view: &ListView) -> io::Result<()> {
    match view {
        ListView::Empty(state) => {
            writeln!(out, "{}", state.title)?;
            if let Some(description) = &state.description {
                writeln!(out, "{description}")?;
            }
        }
        ListView::Rows { headers, rows } => {
            let header: Vec<&str> = std::iter::once("ID")
                .chain(headers.iter().map(String::as_str))
                .collect();
            let body: Vec<Vec<&str>> = rows
                .iter()
                .map(|row| {
                    std::iter::once(row.id.as_str())
                        .chain(row.cells.iter().map(String::as_str))
                        .collect()
                })
                .collect();

            let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
            for row in &body {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            write_row(out, &header, &widths)?;
            for row in &body {
                write_row(out, row, &widths)?;
            }
        }
    }
    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[&str], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

/// Print each failing field on its own line.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn form_errors(out: &mut impl Write, errors: &FormErrors) -> io::Result<()> {
    for error in errors {
        writeln!(out, "  {}: {}", error.field, error.message)?;
    }
    Ok(())
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is no.
///
/// # Errors
///
/// Returns error if the terminal cannot be read or written.
pub fn confirm(question: &str) -> io::Result<bool> {
    let answer = ask(&format!("{question} [y/N] "))?;
    Ok(is_yes(&answer))
}

/// Read a secret from the terminal without echoing it.
///
/// # Errors
///
/// Returns error if the terminal cannot be read or written.
pub fn secret(label: &str) -> io::Result<SecretString> {
    rpassword::prompt_password(format!("{label}: ")).map(SecretString::from)
}

fn ask(prompt: &str) -> io::Result<String> {
    let mut out = io::stdout().lock();
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_owned())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
