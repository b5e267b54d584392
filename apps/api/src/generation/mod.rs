// Résumé generation: build the block layout, render it to PDF bytes, store the file.
// Rendering runs inside tokio::task::spawn_blocking; storage goes through ResumeStorage.

pub mod handlers;
pub mod pipeline;
