// crates/repton-cli/src/io/blob.rs

use anyhow::Context;

pub fn read_blob(path: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read blob: {path}"))
}

pub fn write_blob(path: &str, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write blob: {path}"))?;
    Ok(())
}
