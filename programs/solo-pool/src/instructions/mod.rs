//! Instruction handlers for the pool accountant.
//!
//! # Module Organization
//!
//! - **initialize**: accountant creation and token topology validation
//! - **admin**: pause, authority transfer, role and fee configuration
//! - **register_pool / configure_pool**: per-pool funding accounts
//! - **deposit_for / withdraw**: network-driven provider flows
//! - **request_funding / renounce_funding**: funding-manager flows
//! - **on_fees_collected**: fee accrual notification

pub mod initialize;

pub mod admin;
pub mod configure_pool;
pub mod register_pool;

pub mod deposit_for;
pub mod on_fees_collected;
pub mod withdraw;

pub mod renounce_funding;
pub mod request_funding;

// Re-export all context structs for lib.rs
pub use initialize::InitializeAccountant;

pub use admin::{
    AcceptAuthorityTransfer, CancelAuthorityTransfer, InitiateAuthorityTransfer, PauseAccountant,
    SetFundingManager, SetNetwork, SetWithdrawalFee, UnpauseAccountant,
};

pub use configure_pool::{SetFundingLimit, SetPoolWhitelisted};
pub use register_pool::RegisterPool;

pub use deposit_for::DepositFor;
pub use on_fees_collected::OnFeesCollected;
pub use withdraw::Withdraw;

pub use renounce_funding::RenounceFunding;
pub use request_funding::RequestFunding;
