// Expected-points model for Fantasy Premier League players, plus the
// analysis and export built on top of it.

pub mod analysis;
pub mod engine;
pub mod export;
