pub mod airdrop;
pub mod enter_staking;
pub mod initialize;
pub mod initialize_user_state;
pub mod leave_staking;

pub use airdrop::*;
pub use enter_staking::*;
pub use initialize::*;
pub use initialize_user_state::*;
pub use leave_staking::*;
