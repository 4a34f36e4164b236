use thiserror::Error;

/// Grid construction errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    #[error("grid must be non-empty (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },

    #[error("cell_size must be finite and > 0 (got {0})")]
    InvalidCellSize(f32),

    #[error("walkability data has {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, NavError>;
