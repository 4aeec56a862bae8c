//! Error taxonomy shared across the TupleDNS workspace.

/// Errors raised by coordinate validation, range expansion, and the
/// discovery engine.
///
/// Validation failures (`InvalidCoordinate`, `InvalidParameter`,
/// `CapabilityParse`) are always raised before any substrate
/// interaction. `QueryFailed` and `Timeout` describe whole-call
/// failure; per-sub-query failures travel inside a successful
/// `FindResult` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TupleError {
    /// Malformed coordinate or pattern text.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Bad TTL, mismatched range-spec/template placeholders, or an
    /// empty required argument.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Substrate-level failure not attributable to a deadline.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A sub-query (or every sub-query of a call) exceeded its deadline.
    #[error("query timed out")]
    Timeout,

    /// Substrate-authoritative empty answer. The engine maps this to a
    /// successful empty result; the variant exists for boundary code.
    #[error("no results")]
    NoResults,

    /// Malformed capability tag or capability record payload.
    #[error("capability parse error: {0}")]
    CapabilityParse(String),

    /// Operation issued on a handle after `close()`.
    #[error("client is closed")]
    Closed,
}
