/// Label-encoded categorical datasets
pub mod dataset;
/// String to code encoding of raw CSV cells
pub mod encoder;
