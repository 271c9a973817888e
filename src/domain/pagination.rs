/// Offset window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 100;

    /// Missing values fall back to `skip = 0`, `limit = 100`; `limit` is clamped to `1..=100`.
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        let skip = skip.map(i64::from).unwrap_or(0);
        let limit = limit
            .map(i64::from)
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
