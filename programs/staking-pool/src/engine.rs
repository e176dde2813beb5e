//! Staking engine: the ledger transitions behind each instruction
//!
//! Every operation runs in three phases. All checks and checked arithmetic
//! come first, then the asset moves through the `Custody`, then the new
//! values are written to the pool and user entry. Nothing is written on an
//! error path, so a failed call leaves the ledger exactly as it found it.
//!
//! Only `enter_staking` and `leave_staking` touch `staked_total` and
//! `staked_amount`, and always by the same delta, which keeps
//! `Pool::staked_total` equal to the sum over all user entries.

use anchor_lang::prelude::*;

use crate::authority::AssetAuthority;
use crate::custody::Custody;
use crate::error::PoolError;
use crate::state::{Pool, UserState};

/// Accounts presented alongside the pool that must match its stored bindings
#[derive(Clone, Copy, Debug)]
pub struct Bindings {
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub asset_authority: Pubkey,
}

impl Bindings {
    pub fn check(&self, pool: &Pool) -> Result<()> {
        require_keys_eq!(self.mint, pool.mint, PoolError::InvalidMint);
        require_keys_eq!(self.vault, pool.vault, PoolError::InvalidVault);
        require_keys_eq!(
            self.asset_authority,
            pool.asset_authority,
            PoolError::Unauthorized
        );
        Ok(())
    }
}

/// Everything an initializer presents for a new pool
#[derive(Clone, Copy, Debug)]
pub struct PoolSetup {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub bump: u8,
    pub asset_authority: Pubkey,
    pub mint_authority: Option<Pubkey>,
    pub vault: Pubkey,
    pub vault_mint: Pubkey,
    pub vault_owner: Pubkey,
}

/// Stake of one user and the pool total after an enter or leave
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeReceipt {
    pub staked_amount: u64,
    pub staked_total: u64,
}

/// Binds a pool to its mint, vault and the canonical asset authority
pub fn initialize(
    pool: &mut Pool,
    setup: &PoolSetup,
    program_id: &Pubkey,
) -> Result<AssetAuthority> {
    let authority = AssetAuthority::canonical(
        &setup.mint,
        &setup.pool,
        setup.bump,
        &setup.asset_authority,
        program_id,
    )?;

    // airdrops mint through the authority
    require!(
        setup.mint_authority == Some(authority.address()),
        PoolError::AuthorityMismatch
    );
    require!(
        setup.vault_mint == setup.mint && setup.vault_owner == authority.address(),
        PoolError::InvalidVault
    );

    pool.initialize(&authority, setup.vault)?;

    msg!("Pool initialized for mint: {}", pool.mint);
    msg!("Vault: {}", pool.vault);
    msg!("Asset authority: {} (bump {})", pool.asset_authority, pool.bump);

    Ok(authority)
}

/// Issues `amount` to the holder. Staking state is left untouched.
pub fn airdrop<C: Custody>(
    pool: &Pool,
    bindings: &Bindings,
    authority: &AssetAuthority,
    custody: &mut C,
    amount: u64,
) -> Result<()> {
    pool.require_initialized()?;
    bindings.check(pool)?;
    require_keys_eq!(
        authority.address(),
        pool.asset_authority,
        PoolError::Unauthorized
    );

    custody.mint_to_holder(authority, amount)?;

    msg!("Airdropped {} tokens", amount);
    Ok(())
}

pub fn initialize_user_state(pool: &Pool, user: &mut UserState, bump: u8) -> Result<()> {
    pool.require_initialized()?;
    user.initialize(bump)
}

pub fn enter_staking<C: Custody>(
    pool: &mut Pool,
    user: &mut UserState,
    bindings: &Bindings,
    custody: &mut C,
    amount: u64,
) -> Result<StakeReceipt> {
    require!(amount > 0, PoolError::InvalidAmount);
    pool.require_initialized()?;
    bindings.check(pool)?;

    let staked = user.stake()?;
    require!(
        custody.holder_balance() >= amount,
        PoolError::InsufficientBalance
    );

    let staked_total = pool
        .staked_total
        .checked_add(amount)
        .ok_or(PoolError::Overflow)?;
    let staked_amount = staked.checked_add(amount).ok_or(PoolError::Overflow)?;

    custody.deposit(amount)?;

    pool.staked_total = staked_total;
    user.staked_amount = staked_amount;

    msg!(
        "Staked {} tokens: user stake {}, pool total {}",
        amount,
        staked_amount,
        staked_total
    );
    Ok(StakeReceipt {
        staked_amount,
        staked_total,
    })
}

pub fn leave_staking<C: Custody>(
    pool: &mut Pool,
    user: &mut UserState,
    bindings: &Bindings,
    authority: &AssetAuthority,
    custody: &mut C,
    amount: u64,
) -> Result<StakeReceipt> {
    require!(amount > 0, PoolError::InvalidAmount);
    pool.require_initialized()?;
    bindings.check(pool)?;
    require_keys_eq!(
        authority.address(),
        pool.asset_authority,
        PoolError::Unauthorized
    );

    let staked = user.stake()?;
    require!(amount <= staked, PoolError::InsufficientStake);

    // a total below one user's stake means the ledger is already corrupt
    let staked_total = pool
        .staked_total
        .checked_sub(amount)
        .ok_or(PoolError::Overflow)?;
    let staked_amount = staked - amount;

    custody.release(authority, amount)?;

    pool.staked_total = staked_total;
    user.staked_amount = staked_amount;

    msg!(
        "Unstaked {} tokens: user stake {}, pool total {}",
        amount,
        staked_amount,
        staked_total
    );
    Ok(StakeReceipt {
        staked_amount,
        staked_total,
    })
}
