mod bit_matrix;
mod set_bits;

pub use bit_matrix::*;
pub use set_bits::SetBits;
