// Main rules module - delegates to one sub-module per check
// - engine.rs: RuleEngine, CheckRule trait and debug tracing
// - text_format.rs: fonts, alignment, indent and spacing of body text
// - table_of_contents.rs: heading numbering
// - references.rs: reference list format
// - figures.rs: figure caption alignment
// - progress.rs: console progress bars shared by the checks

pub mod engine;
pub mod figures;
pub mod progress;
pub mod references;
pub mod table_of_contents;
pub mod text_format;

pub use engine::*;
pub use figures::FiguresRule;
pub use references::ReferencesRule;
pub use table_of_contents::TableOfContentsRule;
pub use text_format::TextFormatRule;
