// src/extractors/mod.rs
pub mod description;

// Re-export key extraction types for convenience
pub use description::{
    extract_and_format_descriptions,
    DescriptionExtractor,
    DescriptionSource,
    Extraction,
    HtmlDocument,
};
