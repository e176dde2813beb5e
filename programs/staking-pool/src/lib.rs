use anchor_lang::prelude::*;

declare_id!("7VWcjkxeQNAnb9PDTkXYxP3oSFxXEiYUMBStn39rr4PX");

pub mod authority;
pub mod constants;
pub mod custody;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
pub mod query;
pub mod state;

pub use authority::*;
pub use constants::*;
pub use custody::*;
pub use error::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

#[program]
pub mod staking_pool {
    use super::*;

    /// Bind a freshly allocated pool account to its mint, vault and asset authority.
    /// `bump` must be the canonical bump of the asset authority PDA.
    pub fn initialize(ctx: Context<Initialize>, bump: u8) -> Result<()> {
        instructions::initialize(ctx, bump)
    }

    /// Mint `amount` of the pool asset into the caller's token account
    pub fn airdrop(ctx: Context<Airdrop>, amount: u64) -> Result<()> {
        instructions::airdrop(ctx, amount)
    }

    /// Create the caller's user ledger entry for this pool
    pub fn initialize_user_state(ctx: Context<InitializeUserState>) -> Result<()> {
        instructions::initialize_user_state(ctx)
    }

    /// Move `amount` from the caller's token account into the vault
    pub fn enter_staking(ctx: Context<EnterStaking>, amount: u64) -> Result<()> {
        instructions::enter_staking(ctx, amount)
    }

    /// Release `amount` from the vault back to the caller.
    /// Partial withdrawals leave the remainder staked.
    pub fn leave_staking(ctx: Context<LeaveStaking>, amount: u64) -> Result<()> {
        instructions::leave_staking(ctx, amount)
    }
}
