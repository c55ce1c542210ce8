pub mod lattice;
pub mod monoid;
pub mod order;
pub mod semigroup;
