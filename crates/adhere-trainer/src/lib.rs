//! # adhere-trainer
//!
//! Fits one binary classifier per (user, habit) key from (features, label)
//! pairs. The fit is fully deterministic: zero initialization, fixed
//! iteration cap, and a fixed early-stop tolerance mean identical training
//! pairs always produce bit-identical weights.

pub mod logistic;
pub mod standardize;

mod fit;

pub use fit::fit;
pub use logistic::sigmoid;
