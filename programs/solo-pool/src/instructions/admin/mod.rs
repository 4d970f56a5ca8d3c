//! Administrative instructions: pause, authority transfer, configuration.

pub mod authority;
pub mod configure;
pub mod pause;

pub use authority::{AcceptAuthorityTransfer, CancelAuthorityTransfer, InitiateAuthorityTransfer};
pub use configure::{SetFundingManager, SetNetwork, SetWithdrawalFee};
pub use pause::{PauseAccountant, UnpauseAccountant};
