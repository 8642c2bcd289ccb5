//! Error types for address-spec construction and algebra
//!
//! Construction problems are reported immediately by the constructors;
//! algebra operations only fail for variants that have no decision procedure.

/// Result alias for address-spec construction
pub type SpecResult<T> = Result<T, AddressSpecError>;

/// Invalid-construction errors for [`AddressSpec`](super::AddressSpec)
#[derive(Debug, thiserror::Error)]
pub enum AddressSpecError {
    /// No anchor URL was supplied
    #[error("Address spec requires an anchor URL")]
    MissingAnchor,

    /// A union was described without a member list
    #[error("Union address spec requires a member list")]
    MissingMembers,

    /// The suffix pattern does not compile
    #[error("Invalid suffix pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Lower bound sorts after the upper bound
    #[error("Range lower bound '{lower}' is greater than upper bound '{upper}'")]
    InvertedRange { lower: String, upper: String },
}

/// Returned by `is_disjoint`/`subsumes` when no answer can be computed
///
/// Callers must treat this as "unknown" and assume the conservative case
/// (overlapping, not contained).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} is not supported for {variant} address specs")]
pub struct UnsupportedOperation {
    pub operation: &'static str,
    pub variant: &'static str,
}

impl UnsupportedOperation {
    pub(crate) const fn new(operation: &'static str, variant: &'static str) -> Self {
        Self { operation, variant }
    }
}
