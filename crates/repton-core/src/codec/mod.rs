// crates/repton-core/src/codec/mod.rs

pub mod bitstream;
pub mod scramble;
