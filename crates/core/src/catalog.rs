//! Shape catalog - the ordered `(shape, color)` list pieces are drawn from
//!
//! The catalog is configuration: it is fixed when a game is constructed and the
//! state machine only ever refers to entries by index.

use thiserror::Error;

use crate::piece::Piece;
use crate::shape::{Shape, ShapeError};
use crate::types::Color;

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    pub shape: Shape,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one shape")]
    Empty,
    #[error("shape #{index} is invalid: {source}")]
    Shape {
        index: usize,
        #[source]
        source: ShapeError,
    },
    #[error("color #{index} is not a #rrggbb value: {value:?}")]
    Color { index: usize, value: String },
}

/// Ordered, non-empty list of spawnable shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    entries: Vec<CatalogEntry>,
}

/// The seven classic shapes, each with its own color
const CLASSIC: [CatalogEntry; 7] = [
    // I
    CatalogEntry {
        shape: Shape::fixed(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
        color: Color::rgb(0xff, 0x6b, 0x6b),
    },
    // O
    CatalogEntry {
        shape: Shape::fixed(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        color: Color::rgb(0x4e, 0xcd, 0xc4),
    },
    // T
    CatalogEntry {
        shape: Shape::fixed(2, 3, [[1, 1, 1, 0], [0, 1, 0, 0], [0; 4], [0; 4]]),
        color: Color::rgb(0x45, 0xb7, 0xd1),
    },
    // Z
    CatalogEntry {
        shape: Shape::fixed(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
        color: Color::rgb(0xf9, 0xca, 0x24),
    },
    // S
    CatalogEntry {
        shape: Shape::fixed(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        color: Color::rgb(0xc4, 0x45, 0x69),
    },
    // L
    CatalogEntry {
        shape: Shape::fixed(2, 3, [[1, 1, 1, 0], [1, 0, 0, 0], [0; 4], [0; 4]]),
        color: Color::rgb(0xa2, 0x9b, 0xfe),
    },
    // J
    CatalogEntry {
        shape: Shape::fixed(2, 3, [[1, 1, 1, 0], [0, 0, 1, 0], [0; 4], [0; 4]]),
        color: Color::rgb(0x55, 0xef, 0xc4),
    },
];

impl ShapeCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries })
    }

    /// Build a catalog from raw 0/1 rows and `#rrggbb` colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::ShapeCatalog;
    ///
    /// let bar: &[&[u8]] = &[&[1, 1, 1, 1]];
    /// let square: &[&[u8]] = &[&[1, 1], &[1, 1]];
    /// let catalog = ShapeCatalog::from_raw(&[(bar, "#ff6b6b"), (square, "#4ecdc4")]).unwrap();
    /// assert_eq!(catalog.len(), 2);
    /// ```
    pub fn from_raw(raw: &[(&[&[u8]], &str)]) -> Result<Self, CatalogError> {
        let entries = raw
            .iter()
            .enumerate()
            .map(|(index, &(rows, hex))| {
                let shape =
                    Shape::from_rows(rows).map_err(|source| CatalogError::Shape { index, source })?;
                let color = Color::from_hex(hex).ok_or_else(|| CatalogError::Color {
                    index,
                    value: hex.to_string(),
                })?;
                Ok(CatalogEntry { shape, color })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// The seven classic tetromino shapes
    pub fn classic() -> Self {
        Self {
            entries: CLASSIC.to_vec(),
        }
    }

    /// Catalog holding a single shape, every spawn uses it
    pub fn single(shape: Shape, color: Color) -> Self {
        Self {
            entries: vec![CatalogEntry { shape, color }],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Spawn the entry at `index`, or `None` if out of range
    pub fn spawn(&self, index: usize) -> Option<Piece> {
        self.get(index).map(|e| Piece::spawn(e.shape, e.color))
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::classic()
    }
}
