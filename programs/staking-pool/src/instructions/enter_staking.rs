use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::USER_STATE_SEED;
use crate::custody::TokenCustody;
use crate::engine::{self, Bindings};
use crate::error::PoolError;
use crate::events::StakeEntered;
use crate::state::{Pool, UserState};

/// Deposit `amount` into the vault and credit it to the caller's stake
///
/// The transfer is signed by the caller. Zero amounts, amounts above the
/// caller's token balance and uninitialized user entries are rejected before
/// any token moves.
pub fn enter_staking(ctx: Context<EnterStaking>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let bindings = ctx.accounts.bindings();
    let mut custody = ctx.accounts.custody();

    let pool = &mut ctx.accounts.pool.load_mut()?;
    let user_state = &mut ctx.accounts.user_state;

    let receipt = engine::enter_staking(pool, user_state, &bindings, &mut custody, amount)?;

    emit!(StakeEntered {
        pool: pool_key,
        user: ctx.accounts.user.key(),
        amount,
        staked_amount: receipt.staked_amount,
        staked_total: receipt.staked_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EnterStaking<'info> {
    #[account(mut)]
    pub pool: AccountLoader<'info, Pool>,

    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: compared against the pool's stored asset authority
    pub asset_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Source of the staked tokens
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

impl<'info> EnterStaking<'info> {
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
