use harvest_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

/// Withdraws a stake-bearing asset from a pool. The sequence mirrors
/// deposit: accrue, settle the pending reward, then move the stake out.
/// Amounts beyond the staked balance are rejected, never clamped.
pub fn process_withdraw(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = Withdraw::try_from_bytes(data)?;
    let pool_id = u64::from_le_bytes(args.pool_id);
    let amount = u64::from_le_bytes(args.amount);
    if amount == 0 {
        return Err(HarvestError::InvalidAmount.into());
    }

    // Load accounts.
    let clock = Clock::get()?;
    let [signer_info, config_info, treasury_info, treasury_tokens_info, reward_mint_info, stake_mint_info, recipient_info, reward_recipient_info, pool_info, pool_tokens_info, stake_info, system_program, token_program, associated_token_program] =
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
    stake_mint_info.has_address(&pool.stake_mint)?.as_mint()?;
    pool_tokens_info
        .is_writable()?
        .as_associated_token_account(pool_info.key, stake_mint_info.key)?;
    stake_info.has_seeds(
        &[STAKE, &signer_info.key.to_bytes(), &pool_id.to_le_bytes()],
        &harvest_api::ID,
    )?;
    let stake = stake_info
        .as_account_mut::<Stake>(&harvest_api::ID)?
        .assert_mut(|s| s.authority == *signer_info.key && s.pool_id == pool_id)?;
    system_program.is_program(&system_program::ID)?;
    token_program.is_program(&spl_token::ID)?;
    associated_token_program.is_program(&spl_associated_token_account::ID)?;

    // Create the recipient accounts.
    if recipient_info.data_is_empty() {
        create_associated_token_account(
            signer_info,
            signer_info,
            recipient_info,
            stake_mint_info,
            system_program,
            token_program,
            associated_token_program,
        )?;
    } else {
        recipient_info.as_associated_token_account(signer_info.key, stake_mint_info.key)?;
    }
    if reward_recipient_info.data_is_empty() {
        create_associated_token_account(
            signer_info,
            signer_info,
            reward_recipient_info,
            reward_mint_info,
            system_program,
            token_program,
            associated_token_program,
        )?;
    } else {
        reward_recipient_info.as_associated_token_account(signer_info.key, reward_mint_info.key)?;
    }

    // Bring the pool current and settle the pending reward against the
    // funding ledger.
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

    // Update the position. Rejects zero or over-balance amounts.
    stake.withdraw(amount, pool)?;

    // Pay out the settled reward and release the stake from custody.
    if owed > 0 {
        transfer_signed(
            treasury_info,
            treasury_tokens_info,
            reward_recipient_info,
            token_program,
            owed,
            &[TREASURY],
        )?;
    }
    transfer_signed(
        pool_info,
        pool_tokens_info,
        recipient_info,
        token_program,
        amount,
        &[POOL, &pool_id.to_le_bytes()],
    )?;

    // The custody account must always cover the book total.
    let pool_tokens =
        pool_tokens_info.as_associated_token_account(pool_info.key, stake_mint_info.key)?;
    assert!(
        pool_tokens.amount >= pool.total_staked,
        "Pool custody insufficient to cover total staked"
    );

    sol_log(&format!("Withdrew {} from pool {}, settled {}", amount, pool_id, owed).as_str());

    Ok(())
}
