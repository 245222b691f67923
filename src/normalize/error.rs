use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("interpolation bounds out of order: lower second {lower}, upper second {upper}")]
    InvalidOrdering { lower: i64, upper: i64 },
    #[error("missing second {second} has no known neighbour on one side")]
    UnboundedGap { second: i64 },
    #[error("cannot combine an empty set of samples")]
    EmptyCombine,
    #[error("{missing} missing seconds exceed the backfill limit of {limit}")]
    GapTooLarge { missing: u64, limit: u64 },
}
