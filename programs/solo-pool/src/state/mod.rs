//! State accounts for the pool accountant.

pub mod accountant;
pub mod pool_funding;

pub use accountant::PoolAccountant;
pub use pool_funding::PoolFunding;
