use harvest_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

/// Funds the reward reserve and extends the emission horizon. Funding is
/// additive: it extends the horizon from its current end, or from the
/// current slot if emission had already run out.
pub fn process_fund(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = Fund::try_from_bytes(data)?;
    let amount = u64::from_le_bytes(args.amount);
    if amount == 0 {
        return Err(HarvestError::InvalidAmount.into());
    }

    // Load accounts.
    let clock = Clock::get()?;
    if accounts.len() < 8 {
        return Err(ProgramError::NotEnoughAccountKeys);
    }
    let [signer_info, config_info, treasury_info, treasury_tokens_info, mint_info, sender_info, token_program, harvest_program] =
        &accounts[0..8]
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let pool_accounts = &accounts[8..];

    signer_info.is_signer()?;
    let config = config_info.as_account::<Config>(&harvest_api::ID)?;
    if config.admin != *signer_info.key {
        return Err(HarvestError::Unauthorized.into());
    }
    let treasury = treasury_info.as_account_mut::<Treasury>(&harvest_api::ID)?;
    mint_info.has_address(&config.reward_mint)?.as_mint()?;
    treasury_tokens_info
        .is_writable()?
        .as_associated_token_account(treasury_info.key, mint_info.key)?;
    sender_info
        .is_writable()?
        .as_associated_token_account(signer_info.key, mint_info.key)?;
    token_program.is_program(&spl_token::ID)?;
    harvest_program.is_program(&harvest_api::ID)?;

    // Settle every pool under the old horizon first. A pool left unaccrued
    // across a funding gap would otherwise credit the dead slots once the
    // horizon moves past them.
    accrue_all_pools(pool_accounts, config, treasury, clock.slot, None)?;

    treasury.extend_emission(amount, config.reward_rate, clock.slot);

    // Pull the funding into the reserve.
    transfer(
        signer_info,
        sender_info,
        treasury_tokens_info,
        token_program,
        amount,
    )?;

    sol_log(
        &format!(
            "Funded {} reward units, emission ends at slot {}",
            amount, treasury.emission_end_slot
        )
        .as_str(),
    );

    // Emit event.
    program_log(
        &[config_info.clone(), harvest_program.clone()],
        FundEvent {
            disc: 0,
            amount,
            total_funded: treasury.total_funded,
            emission_end_slot: treasury.emission_end_slot,
            ts: clock.unix_timestamp,
        }
        .to_bytes(),
    )?;

    Ok(())
}
