use thiserror::Error;

use crate::CarrierTag;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RelError {
  /// Two operands were built over different carriers. Carriers are compared
  /// by identity, so this fires even if their contents are equal.
  #[error("Error: {op}: carrier mismatch ({left} vs {right})")]
  CarrierMismatch {
    op: &'static str,
    left: CarrierTag,
    right: CarrierTag,
  },

  /// An element was not found in the carrier it was declared to belong to.
  #[error("Error: {op}: element is not a member of carrier {carrier}")]
  OutOfCarrier {
    op: &'static str,
    carrier: CarrierTag,
  },

  #[error("Error: {op}: expected a {rows}x{cols} matrix, found {found_rows}x{found_cols}")]
  DimensionMismatch {
    op: &'static str,
    rows: usize,
    cols: usize,
    found_rows: usize,
    found_cols: usize,
  },

  /// Exhaustive verification was asked to enumerate more subsets than the
  /// configured limit allows.
  #[error("Error: exhaustive check over {bits} carrier elements exceeds the limit of {limit}")]
  TooLarge { bits: usize, limit: usize },

  #[error("Error: unknown relation strategy \"{0}\", expected \"dense\" or \"bit\"")]
  InvalidStrategy(String),

  /// A numeric parameter was outside the range its operation accepts.
  #[error("Error: invalid {name} \"{value}\"")]
  InvalidParameter { name: &'static str, value: String },
}

pub type RelResult<T = ()> = Result<T, RelError>;
