//! Chart rendering and slide-deck assembly.

pub mod assembler;
pub mod charts;
pub mod fonts;
pub mod pptx;

pub use assembler::{ReportAssembler, REPORT_FILE};
pub use charts::{ChartRenderer, ChartSet, RenderedChart};
pub use fonts::{resolve_cjk_family, FontCatalog, SystemFonts};
