use harvest_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

/// Registers a new pool for a stake-bearing asset. Pools are append-only:
/// the new pool takes id `config.pool_count`.
pub fn process_add_pool(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = AddPool::try_from_bytes(data)?;
    let weight = u64::from_le_bytes(args.weight);
    let with_update = args.with_update != 0;

    // Load accounts.
    let clock = Clock::get()?;
    if accounts.len() < 10 {
        return Err(ProgramError::NotEnoughAccountKeys);
    }
    let [signer_info, config_info, treasury_info, pool_info, pool_tokens_info, stake_mint_info, system_program, token_program, associated_token_program, harvest_program] =
        &accounts[0..10]
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let pool_accounts = &accounts[10..];

    signer_info.is_signer()?;
    let config = config_info.as_account_mut::<Config>(&harvest_api::ID)?;
    if config.admin != *signer_info.key {
        return Err(HarvestError::Unauthorized.into());
    }
    let treasury = treasury_info.as_account::<Treasury>(&harvest_api::ID)?;
    let pool_id = config.pool_count;
    pool_info
        .is_writable()?
        .has_seeds(&[POOL, &pool_id.to_le_bytes()], &harvest_api::ID)?;
    stake_mint_info.as_mint()?;
    system_program.is_program(&system_program::ID)?;
    token_program.is_program(&spl_token::ID)?;
    associated_token_program.is_program(&spl_associated_token_account::ID)?;
    harvest_program.is_program(&harvest_api::ID)?;

    // Settle every existing pool before the total weight changes, so past
    // slots are attributed under the weights that were in force.
    if with_update {
        accrue_all_pools(pool_accounts, config, treasury, clock.slot, None)?;
    }

    // Create the pool account.
    create_account::<Pool>(
        pool_info,
        system_program,
        signer_info,
        &harvest_api::ID,
        &[POOL, &pool_id.to_le_bytes()],
    )?;
    let pool = pool_info.as_account_mut::<Pool>(&harvest_api::ID)?;
    pool.id = pool_id;
    pool.stake_mint = *stake_mint_info.key;
    pool.weight = weight;
    pool.last_accrual_slot = clock.slot;
    pool.rewards_factor = Factor::ZERO;
    pool.total_staked = 0;

    // Create the pool custody token account.
    if pool_tokens_info.data_is_empty() {
        create_associated_token_account(
            signer_info,
            pool_info,
            pool_tokens_info,
            stake_mint_info,
            system_program,
            token_program,
            associated_token_program,
        )?;
    } else {
        pool_tokens_info.as_associated_token_account(pool_info.key, stake_mint_info.key)?;
    }

    // Register the pool.
    config.total_weight += weight;
    config.pool_count += 1;

    sol_log(&format!("Added pool {} with weight {}", pool_id, weight).as_str());

    // Emit event.
    program_log(
        &[config_info.clone(), harvest_program.clone()],
        PoolAddedEvent {
            disc: 1,
            pool_id,
            stake_mint: *stake_mint_info.key,
            weight,
            total_weight: config.total_weight,
            ts: clock.unix_timestamp,
        }
        .to_bytes(),
    )?;

    Ok(())
}
