/// Tag written into `Pool::magic` once a pool has been initialized
pub const POOL_MAGIC: u64 = 0x6666;

/// Prefix of the user ledger entry PDA: [USER_STATE_SEED, pool, user]
pub const USER_STATE_SEED: &[u8] = b"user_state";
