// src/utils/mod.rs
pub mod text_transforms;

pub use text_transforms::TextTransform;
