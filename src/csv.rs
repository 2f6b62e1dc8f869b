// src/csv.rs
//
// Thin layer over the `csv` crate for the debug dumps. Rows are ragged
// (tabula does not promise a rectangular grid), so both sides run flexible.

use std::io::{Read, Write};

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::Result;

/* ---------------- Writing ---------------- */

/// Write an optional header row followed by `rows` to any writer.
pub fn write_rows<W: Write>(w: W, headers: Option<&[String]>, rows: &[Vec<String>]) -> Result<()> {
    let mut out = WriterBuilder::new().flexible(true).from_writer(w);
    if let Some(h) = headers {
        out.write_record(h)?;
    }
    for r in rows {
        out.write_record(r)?;
    }
    out.flush()?;
    Ok(())
}

/// Same as [`write_rows`], into a `String`.
pub fn rows_to_string(headers: Option<&[String]>, rows: &[Vec<String>]) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_rows(&mut buf, headers, rows)?;
    Ok(match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    })
}

/* ---------------- Parsing ---------------- */

/// Read every record, header line included, as plain rows.
pub fn parse_rows<R: Read>(r: R) -> Result<Vec<Vec<String>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(r);
    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
