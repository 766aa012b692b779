use steel::*;

use crate::consts::POOL;
use crate::error::HarvestError;
use crate::state::{Config, Pool, Treasury};

/// Accrues every registered pool, in id order, through `slot`.
///
/// Mass-accrual callers (funding, registry changes with update) must pass
/// all `config.pool_count` pool accounts; `skip` names an account the caller
/// has already accrued and holds borrowed. The id-ordered seed check rejects
/// duplicate or missing pools, so no pool can be left behind with an
/// unaccrued interval.
pub fn accrue_all_pools(
    pool_accounts: &[AccountInfo<'_>],
    config: &Config,
    treasury: &Treasury,
    slot: u64,
    skip: Option<&Pubkey>,
) -> ProgramResult {
    if pool_accounts.len() != config.pool_count as usize {
        return Err(HarvestError::MissingPoolAccounts.into());
    }
    for (id, pool_info) in pool_accounts.iter().enumerate() {
        pool_info.has_seeds(&[POOL, &(id as u64).to_le_bytes()], &crate::ID)?;
        if let Some(skip_key) = skip {
            if pool_info.key == skip_key {
                continue;
            }
        }
        let pool = pool_info.as_account_mut::<Pool>(&crate::ID)?;
        pool.accrue(config, treasury, slot);
    }
    Ok(())
}
