use harvest_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

/// Re-weights a pool. Reweighting never touches the rewards factor directly:
/// the target pool is always accrued first so slots already elapsed settle
/// under the old weight, and the new weight only changes future accrual.
pub fn process_set_pool_weight(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = SetPoolWeight::try_from_bytes(data)?;
    let pool_id = u64::from_le_bytes(args.pool_id);
    let new_weight = u64::from_le_bytes(args.weight);
    let with_update = args.with_update != 0;

    // Load accounts.
    let clock = Clock::get()?;
    if accounts.len() < 5 {
        return Err(ProgramError::NotEnoughAccountKeys);
    }
    let [signer_info, config_info, treasury_info, pool_info, harvest_program] = &accounts[0..5]
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let pool_accounts = &accounts[5..];

    signer_info.is_signer()?;
    let config = config_info.as_account_mut::<Config>(&harvest_api::ID)?;
    if config.admin != *signer_info.key {
        return Err(HarvestError::Unauthorized.into());
    }
    let treasury = treasury_info.as_account::<Treasury>(&harvest_api::ID)?;
    if pool_id >= config.pool_count {
        return Err(HarvestError::PoolNotFound.into());
    }
    pool_info.has_seeds(&[POOL, &pool_id.to_le_bytes()], &harvest_api::ID)?;
    let pool = pool_info
        .as_account_mut::<Pool>(&harvest_api::ID)
        .map_err(|_| HarvestError::PoolNotFound)?;
    harvest_program.is_program(&harvest_api::ID)?;

    pool.accrue(config, treasury, clock.slot);
    if with_update {
        accrue_all_pools(pool_accounts, config, treasury, clock.slot, Some(pool_info.key))?;
    }

    // Apply the new weight.
    let old_weight = pool.weight;
    config.total_weight = config.total_weight - old_weight + new_weight;
    pool.weight = new_weight;

    sol_log(
        &format!(
            "Pool {} weight {} -> {}, total weight {}",
            pool_id, old_weight, new_weight, config.total_weight
        )
        .as_str(),
    );

    // Emit event.
    program_log(
        &[config_info.clone(), harvest_program.clone()],
        PoolWeightEvent {
            disc: 2,
            pool_id,
            old_weight,
            new_weight,
            total_weight: config.total_weight,
            ts: clock.unix_timestamp,
        }
        .to_bytes(),
    )?;

    Ok(())
}
