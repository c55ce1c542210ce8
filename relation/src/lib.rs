mod dense;
pub mod error;
mod finite;
mod map;
mod matrix;
mod relation;
mod subset;
pub mod test_util;
mod witness;

pub use dense::*;
pub use finite::*;
pub use map::*;
pub use matrix::*;
pub use relation::*;
pub use subset::*;
pub use witness::*;
