//! Rendering of the statements that make up a fixture file. Every
//! function writes exactly one line.

use std::io::{self, Write};

use crate::FixtureError;

pub fn create_table<W: Write + ?Sized>(
    writer: &mut W,
    table: &str,
    dimension: usize,
) -> io::Result<()> {
    writeln!(
        writer,
        "CREATE TABLE {table} (id TEXT, embedding FLOAT32({dimension}));"
    )
}

/// `literal` is the bracketed float list, see [`crate::dense::DenseRow::vector_literal`].
pub fn insert_dense<W: Write + ?Sized>(
    writer: &mut W,
    table: &str,
    id: usize,
    literal: &str,
) -> io::Result<()> {
    writeln!(
        writer,
        "INSERT INTO {table} VALUES ('{id}', vector32('{literal}'));"
    )
}

pub fn insert_blob<W: Write + ?Sized>(
    writer: &mut W,
    table: &str,
    id: usize,
    hex: &str,
) -> io::Result<()> {
    writeln!(writer, "INSERT INTO {table} VALUES ('{id}', x'{hex}');")
}

/// Table names are pasted into the statements unquoted, so only plain
/// identifiers are accepted.
pub fn validate_table_name(table: &str) -> Result<(), FixtureError> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(FixtureError::InvalidConfig(format!(
            "table name {table:?} is not a plain sql identifier"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn statements_match_expected_text() {
        assert_eq!(
            "CREATE TABLE vectors (id TEXT, embedding FLOAT32(1024));\n",
            render(|w| create_table(w, "vectors", 1024))
        );
        assert_eq!(
            "INSERT INTO vectors VALUES ('7', vector32('[0.5, 0.25]'));\n",
            render(|w| insert_dense(w, "vectors", 7, "[0.5, 0.25]"))
        );
        assert_eq!(
            "INSERT INTO vectors VALUES ('0', x'00FF09');\n",
            render(|w| insert_blob(w, "vectors", 0, "00FF09"))
        );
    }

    #[test]
    fn table_names() {
        for ok in ["vectors", "_t", "dense_1024"] {
            validate_table_name(ok).unwrap();
        }
        for bad in ["", "1abc", "vec tors", "x;DROP", "ünï"] {
            assert!(validate_table_name(bad).is_err(), "{bad}");
        }
    }
}
