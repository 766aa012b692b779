use harvest_api::prelude::*;
use steel::*;

/// Initializes the ledger: config, treasury and the reward reserve.
pub fn process_initialize(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = Initialize::try_from_bytes(data)?;
    let reward_rate = u64::from_le_bytes(args.reward_rate);
    if reward_rate == 0 {
        return Err(HarvestError::InvalidAmount.into());
    }

    // Load accounts.
    let clock = Clock::get()?;
    let [signer_info, config_info, treasury_info, treasury_tokens_info, mint_info, system_program, token_program, associated_token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?.has_address(&ADMIN_ADDRESS)?;
    config_info.has_seeds(&[CONFIG], &harvest_api::ID)?;
    treasury_info.has_seeds(&[TREASURY], &harvest_api::ID)?;
    mint_info.as_mint()?;
    if !treasury_tokens_info.data_is_empty() {
        treasury_tokens_info.has_address(&treasury_tokens_address(mint_info.key))?;
    }
    system_program.is_program(&system_program::ID)?;
    token_program.is_program(&spl_token::ID)?;
    associated_token_program.is_program(&spl_associated_token_account::ID)?;

    // Create config account.
    if config_info.data_is_empty() {
        create_account::<Config>(
            config_info,
            system_program,
            signer_info,
            &harvest_api::ID,
            &[CONFIG],
        )?;
        let config = config_info.as_account_mut::<Config>(&harvest_api::ID)?;
        config.admin = *signer_info.key;
        config.reward_mint = *mint_info.key;
        config.reward_rate = reward_rate;
        config.total_weight = 0;
        config.pool_count = 0;
    } else {
        config_info.as_account::<Config>(&harvest_api::ID)?;
    }

    // Create treasury account.
    if treasury_info.data_is_empty() {
        create_account::<Treasury>(
            treasury_info,
            system_program,
            signer_info,
            &harvest_api::ID,
            &[TREASURY],
        )?;
        let treasury = treasury_info.as_account_mut::<Treasury>(&harvest_api::ID)?;
        treasury.total_funded = 0;
        treasury.total_paid_out = 0;
        // Nothing accrues until the first funding arrives.
        treasury.emission_end_slot = clock.slot;
    } else {
        treasury_info.as_account::<Treasury>(&harvest_api::ID)?;
    }

    // Create the reward reserve token account.
    if treasury_tokens_info.data_is_empty() {
        create_associated_token_account(
            signer_info,
            treasury_info,
            treasury_tokens_info,
            mint_info,
            system_program,
            token_program,
            associated_token_program,
        )?;
    } else {
        treasury_tokens_info.as_associated_token_account(treasury_info.key, mint_info.key)?;
    }

    Ok(())
}
