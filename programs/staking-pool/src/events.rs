use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub asset_authority: Pubkey,
    pub bump: u8,
}

#[event]
pub struct Airdropped {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
}

#[event]
pub struct UserStateInitialized {
    pub pool: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct StakeEntered {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub staked_total: u64,
}

#[event]
pub struct StakeLeft {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub staked_total: u64,
}
