use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    #[msg("Ledger record is already initialized")]
    AlreadyInitialized,

    #[msg("Ledger record is not initialized")]
    NotInitialized,

    #[msg("Asset authority does not match the derivation from mint, pool and bump")]
    AuthorityMismatch,

    #[msg("Asset authority proof is invalid for this pool")]
    Unauthorized,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Token balance is too low to stake this amount")]
    InsufficientBalance,

    #[msg("Withdrawal exceeds the staked amount")]
    InsufficientStake,

    #[msg("Mint does not match the pool mint")]
    InvalidMint,

    #[msg("Vault does not match the pool vault")]
    InvalidVault,

    #[msg("User token account must be owned by the signer and hold the pool mint")]
    InvalidUserMintAccount,

    #[msg("Arithmetic overflow")]
    Overflow,
}
