use harvest_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

/// Settles a depositor's pending reward without touching the staked balance.
pub fn process_claim(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = Claim::try_from_bytes(data)?;
    let pool_id = u64::from_le_bytes(args.pool_id);

    // Load accounts.
    let clock = Clock::get()?;
    let [signer_info, config_info, treasury_info, treasury_tokens_info, reward_mint_info, recipient_info, pool_info, stake_info, system_program, token_program, associated_token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    let config = config_info.as_account::<Config>(&harvest_api::ID)?;
    if pool_id >= config.pool_count {
        return Err(HarvestError::PoolNotFound.into());
    }
    let treasury = treasury_info.as_account_mut::<Treasury>(&harvest_api::ID)?;
    reward_mint_info.has_address(&config.reward_mint)?.as_mint()?;
    treasury_tokens_info
        .is_writable()?
        .as_associated_token_account(treasury_info.key, reward_mint_info.key)?;
    pool_info.has_seeds(&[POOL, &pool_id.to_le_bytes()], &harvest_api::ID)?;
    let pool = pool_info
        .as_account_mut::<Pool>(&harvest_api::ID)
        .map_err(|_| HarvestError::PoolNotFound)?;
    let stake = stake_info
        .as_account_mut::<Stake>(&harvest_api::ID)?
        .assert_mut(|s| s.authority == *signer_info.key && s.pool_id == pool_id)?;
    system_program.is_program(&system_program::ID)?;
    token_program.is_program(&spl_token::ID)?;
    associated_token_program.is_program(&spl_associated_token_account::ID)?;

    // Create the reward recipient account.
    if recipient_info.data_is_empty() {
        create_associated_token_account(
            signer_info,
            signer_info,
            recipient_info,
            reward_mint_info,
            system_program,
            token_program,
            associated_token_program,
        )?;
    } else {
        recipient_info.as_associated_token_account(signer_info.key, reward_mint_info.key)?;
    }

    // Bring the pool current and settle.
    pool.accrue(config, treasury, clock.slot);
    let owed = stake.pending_reward(pool.rewards_factor);
    if owed > 0 {
        let reserve = treasury_tokens_info
            .as_associated_token_account(treasury_info.key, reward_mint_info.key)?;
        if reserve.amount < owed {
            return Err(HarvestError::InsufficientReserve.into());
        }
        treasury.record_payout(owed)?;
    }
    stake.checkpoint(pool);

    if owed > 0 {
        transfer_signed(
            treasury_info,
            treasury_tokens_info,
            recipient_info,
            token_program,
            owed,
            &[TREASURY],
        )?;
    }

    sol_log(&format!("Claimed {} reward from pool {}", owed, pool_id).as_str());

    Ok(())
}
