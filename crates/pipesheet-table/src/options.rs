//! Table options

/// Options for reading tables
#[derive(Debug, Clone)]
pub struct TableReadOptions {
    /// Field delimiter (default: pipe)
    pub delimiter: u8,
}

impl Default for TableReadOptions {
    fn default() -> Self {
        Self { delimiter: b'|' }
    }
}

/// Options for rendering tables
#[derive(Debug, Clone)]
pub struct TableWriteOptions {
    /// Column separator (default: pipe)
    pub delimiter: char,
    /// Fractional digits printed for numbers (default: 6)
    pub precision: usize,
}

impl Default for TableWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: '|',
            precision: 6,
        }
    }
}
