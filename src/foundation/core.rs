use crate::foundation::error::{CollageError, CollageResult};

/// Edge length in pixels of one square grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CellSize(u32);

impl CellSize {
    /// Default cell edge used by the command line.
    pub const DEFAULT: CellSize = CellSize(200);

    /// Create a validated cell size (`px > 0`).
    pub fn new(px: u32) -> CollageResult<Self> {
        if px == 0 {
            return Err(CollageError::config("cell size must be > 0"));
        }
        Ok(Self(px))
    }

    pub fn px(self) -> u32 {
        self.0
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Location of one cover image, as listed by the collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CollectionReference(pub String);

impl CollectionReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw encoded bytes of one thumbnail. Not decoded until composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer(pub Vec<u8>);

impl ImageBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ImageBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}
