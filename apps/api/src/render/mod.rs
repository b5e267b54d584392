// Rendering collaborator: turns an ordered block list into paginated PDF bytes.
// Rendering is CPU-bound; async callers must go through tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod pdf;

pub use pdf::PdfRenderer;

use thiserror::Error;

use crate::document::DocumentBlock;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to encode page content: {0}")]
    Content(#[source] lopdf::Error),

    #[error("Failed to serialize PDF document: {0}")]
    Serialize(#[source] lopdf::Error),

    #[error("Table row has {cells} cells but {columns} column widths")]
    TableShape { cells: usize, columns: usize },

    #[error("Table row needs {height:.0}pt but a page holds at most {available:.0}pt")]
    RowTooTall { height: f32, available: f32 },
}

/// Lays out document blocks and returns the finished file bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, blocks: &[DocumentBlock]) -> Result<Vec<u8>, RenderError>;
}
