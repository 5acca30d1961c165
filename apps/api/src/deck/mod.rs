// Presentation assembly: slide descriptions in, positioned text-box descriptors out.
// All fitting goes through the layout engine; nothing here re-derives font tables or margins.

pub mod assembler;
pub mod handlers;
pub mod models;
pub mod parse;
pub mod theme;
