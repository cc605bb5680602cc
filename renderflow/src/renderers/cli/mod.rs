//! Terminal rendering utilities

pub mod renderer;
pub mod table;

pub use renderer::TerminalRenderer;
pub use table::{ResultTable, TableStyle};
