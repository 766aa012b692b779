use steel::*;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u32)]
pub enum HarvestError {
    #[error("Caller is not the ledger admin")]
    Unauthorized = 0,
    #[error("Amount must be nonzero and within the staked balance")]
    InvalidAmount = 1,
    #[error("Reward reserve cannot cover the computed payout")]
    InsufficientReserve = 2,
    #[error("Pool does not exist")]
    PoolNotFound = 3,
    #[error("Every registered pool account must be provided")]
    MissingPoolAccounts = 4,
}

error!(HarvestError);
