pub mod allegory;
pub mod equipment;
pub mod galois;
pub mod hoare;
pub mod metrics;
pub mod residual;
pub mod strategy;
pub mod suite;
pub mod verify_opts;

pub use relation::{
  error::{RelError, RelResult},
  BoolMatrix, DefaultMatrix, DenseMatrix, DenseRel, FinMap, Finite, InclusionWitness, Relation,
  Subset,
};
pub use relation_bits::{BitMatrix, BitRel};
