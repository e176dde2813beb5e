use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authority::AssetAuthority;
use crate::constants::USER_STATE_SEED;
use crate::custody::TokenCustody;
use crate::engine::{self, Bindings};
use crate::error::PoolError;
use crate::events::StakeLeft;
use crate::state::{Pool, UserState};

/// Release `amount` from the vault back to the caller
///
/// The vault transfer is signed by the asset authority with seeds rebuilt
/// from the bump stored at initialization. Asking for more than the caller
/// has staked fails with `InsufficientStake` and moves nothing.
pub fn leave_staking(ctx: Context<LeaveStaking>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let bindings = ctx.accounts.bindings();
    let mut custody = ctx.accounts.custody();

    let pool = &mut ctx.accounts.pool.load_mut()?;
    let user_state = &mut ctx.accounts.user_state;

    let authority = AssetAuthority::for_pool(&pool_key, pool, ctx.program_id)?;

    let receipt = engine::leave_staking(
        pool,
        user_state,
        &bindings,
        &authority,
        &mut custody,
        amount,
    )?;

    emit!(StakeLeft {
        pool: pool_key,
        user: ctx.accounts.user.key(),
        amount,
        staked_amount: receipt.staked_amount,
        staked_total: receipt.staked_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct LeaveStaking<'info> {
    #[account(mut)]
    pub pool: AccountLoader<'info, Pool>,

    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: must equal the authority rebuilt from the pool's stored bump
    pub asset_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Destination of the released tokens
    #[account(
        mut,
        constraint = user_token.owner == user.key() @ PoolError::InvalidUserMintAccount,
        constraint = user_token.mint == mint.key() @ PoolError::InvalidUserMintAccount
    )]
    pub user_token: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [USER_STATE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = user_state.bump
    )]
    pub user_state: Account<'info, UserState>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> LeaveStaking<'info> {
    fn bindings(&self) -> Bindings {
        Bindings {
            mint: self.mint.key(),
            vault: self.vault.key(),
            asset_authority: self.asset_authority.key(),
        }
    }

    fn custody(&self) -> TokenCustody<'info> {
        TokenCustody {
            token_program: self.token_program.to_account_info(),
            mint: self.mint.to_account_info(),
            vault: self.vault.to_account_info(),
            asset_authority: self.asset_authority.to_account_info(),
            holder: self.user.to_account_info(),
            holder_token: self.user_token.to_account_info(),
            holder_balance: self.user_token.amount,
        }
    }
}
