//! Concrete meta-allocators.

pub mod buy_hold;
pub mod constant_rebalancer;
pub mod eg;

pub use buy_hold::BuyHold;
pub use constant_rebalancer::ConstantRebalancer;
pub use eg::{DEFAULT_ETA, Eg, eg_step};
