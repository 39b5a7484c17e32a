//! Domain validation errors.

/// Errors raised when constructing domain values from raw input.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// The wilaya code does not identify one of the 58 regions.
    #[error("unknown wilaya code: {0} (expected 1..=58)")]
    UnknownWilayaCode(u8),

    /// No wilaya carries the given name.
    #[error("unknown wilaya name: {0}")]
    UnknownWilayaName(String),

    /// The page size is not one of the allowed values.
    #[error("invalid page size: {0} (allowed: 10, 25, 50, 100)")]
    InvalidPageSize(u32),
}
