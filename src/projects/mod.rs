// Project data module.
// Combines repositories with their computed language shares.

pub mod assemble;
pub mod languages;

pub use assemble::assemble;
pub use languages::compute_shares;
