// crates/repton-cli/src/io/mod.rs

pub mod blob;
pub mod doc;
