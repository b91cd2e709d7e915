// crates/repton-cli/src/io/doc.rs

use std::fs::File;
use std::io::BufReader;

use anyhow::Context;

use repton_core::document::{self, Value};

pub fn read_doc(path: &str) -> anyhow::Result<Value> {
    let f = File::open(path).with_context(|| format!("open document: {path}"))?;
    document::read_value(BufReader::new(f)).with_context(|| format!("parse document: {path}"))
}

/// Returns the number of bytes written.
pub fn write_doc(path: &str, value: &Value) -> anyhow::Result<usize> {
    let text = document::to_string(value).with_context(|| format!("format document: {path}"))?;
    std::fs::write(path, &text).with_context(|| format!("write document: {path}"))?;
    Ok(text.len())
}
