//! Secret masking for report output

pub mod masker;

pub use masker::{is_sensitive, mask_value};
