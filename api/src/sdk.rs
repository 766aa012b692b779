use solana_program::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use steel::*;

use crate::{
    consts::CONFIG,
    instruction::*,
    state::*,
};

pub fn log(signer: Pubkey, msg: &[u8]) -> Instruction {
    let mut data = Log {}.to_bytes();
    data.extend_from_slice(msg);
    Instruction {
        program_id: crate::ID,
        accounts: vec![AccountMeta::new(signer, true)],
        data,
    }
}

/// Emit an event by self-CPI, signed by the config PDA. The accounts slice
/// must hold the config account and the program account.
pub fn program_log(accounts: &[AccountInfo], msg: &[u8]) -> Result<(), ProgramError> {
    let (config_address, _) = config_pda();
    invoke_signed(&log(config_address, msg), accounts, &crate::ID, &[CONFIG])
}

// let [signer_info, config_info, treasury_info, treasury_tokens_info, mint_info, system_program, token_program, associated_token_program] = accounts else {

pub fn initialize(signer: Pubkey, reward_mint: Pubkey, reward_rate: u64) -> Instruction {
    let config_address = config_pda().0;
    let treasury_address = treasury_pda().0;
    let treasury_tokens = treasury_tokens_address(&reward_mint);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(config_address, false),
            AccountMeta::new(treasury_address, false),
            AccountMeta::new(treasury_tokens, false),
            AccountMeta::new(reward_mint, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
        data: Initialize {
            reward_rate: reward_rate.to_le_bytes(),
        }
        .to_bytes(),
    }
}

/// Register a new pool for `stake_mint`. `pool_count` is the current value
/// of `Config.pool_count`; with `with_update`, every existing pool account
/// is appended so the program can accrue them before the total weight
/// changes.
pub fn add_pool(
    signer: Pubkey,
    stake_mint: Pubkey,
    weight: u64,
    with_update: bool,
    pool_count: u64,
) -> Instruction {
    let config_address = config_pda().0;
    let treasury_address = treasury_pda().0;
    let pool_address = pool_pda(pool_count).0;
    let pool_tokens = pool_tokens_address(pool_count, &stake_mint);
    let mut accounts = vec![
        AccountMeta::new(signer, true),
        AccountMeta::new(config_address, false),
        AccountMeta::new(treasury_address, false),
        AccountMeta::new(pool_address, false),
        AccountMeta::new(pool_tokens, false),
        AccountMeta::new(stake_mint, false),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(spl_token::ID, false),
        AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        AccountMeta::new_readonly(crate::ID, false),
    ];
    if with_update {
        for id in 0..pool_count {
            accounts.push(AccountMeta::new(pool_pda(id).0, false));
        }
    }
    Instruction {
        program_id: crate::ID,
        accounts,
        data: AddPool {
            weight: weight.to_le_bytes(),
            with_update: with_update as u8,
        }
        .to_bytes(),
    }
}

/// Re-weight a pool. The program always accrues the target pool first; with
/// `with_update`, every registered pool account is appended and accrued too.
pub fn set_pool_weight(
    signer: Pubkey,
    pool_id: u64,
    weight: u64,
    with_update: bool,
    pool_count: u64,
) -> Instruction {
    let config_address = config_pda().0;
    let treasury_address = treasury_pda().0;
    let pool_address = pool_pda(pool_id).0;
    let mut accounts = vec![
        AccountMeta::new(signer, true),
        AccountMeta::new(config_address, false),
        AccountMeta::new(treasury_address, false),
        AccountMeta::new(pool_address, false),
        AccountMeta::new_readonly(crate::ID, false),
    ];
    if with_update {
        for id in 0..pool_count {
            accounts.push(AccountMeta::new(pool_pda(id).0, false));
        }
    }
    Instruction {
        program_id: crate::ID,
        accounts,
        data: SetPoolWeight {
            pool_id: pool_id.to_le_bytes(),
            weight: weight.to_le_bytes(),
            with_update: with_update as u8,
        }
        .to_bytes(),
    }
}

/// Fund the reward reserve. Every registered pool account is appended so the
/// program can accrue them under the old horizon before extending it.
pub fn fund(signer: Pubkey, reward_mint: Pubkey, amount: u64, pool_count: u64) -> Instruction {
    let config_address = config_pda().0;
    let treasury_address = treasury_pda().0;
    let treasury_tokens = treasury_tokens_address(&reward_mint);
    let sender = get_associated_token_address(&signer, &reward_mint);
    let mut accounts = vec![
        AccountMeta::new(signer, true),
        AccountMeta::new(config_address, false),
        AccountMeta::new(treasury_address, false),
        AccountMeta::new(treasury_tokens, false),
        AccountMeta::new(reward_mint, false),
        AccountMeta::new(sender, false),
        AccountMeta::new_readonly(spl_token::ID, false),
        AccountMeta::new_readonly(crate::ID, false),
    ];
    for id in 0..pool_count {
        accounts.push(AccountMeta::new(pool_pda(id).0, false));
    }
    Instruction {
        program_id: crate::ID,
        accounts,
        data: Fund {
            amount: amount.to_le_bytes(),
        }
        .to_bytes(),
    }
}

pub fn set_admin(signer: Pubkey, admin: Pubkey) -> Instruction {
    let config_address = config_pda().0;
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(config_address, false),
        ],
        data: SetAdmin {
            admin: admin.to_bytes(),
        }
        .to_bytes(),
    }
}

// let [signer_info, config_info, treasury_info, treasury_tokens_info, reward_mint_info, stake_mint_info, sender_info, recipient_info, pool_info, pool_tokens_info, stake_info, system_program, token_program, associated_token_program] = accounts else {

pub fn deposit(
    signer: Pubkey,
    reward_mint: Pubkey,
    stake_mint: Pubkey,
    pool_id: u64,
    amount: u64,
) -> Instruction {
    let config_address = config_pda().0;
    let treasury_address = treasury_pda().0;
    let treasury_tokens = treasury_tokens_address(&reward_mint);
    let pool_address = pool_pda(pool_id).0;
    let pool_tokens = pool_tokens_address(pool_id, &stake_mint);
    let stake_address = stake_pda(signer, pool_id).0;
    let sender = get_associated_token_address(&signer, &stake_mint);
    let recipient = get_associated_token_address(&signer, &reward_mint);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(config_address, false),
            AccountMeta::new(treasury_address, false),
            AccountMeta::new(treasury_tokens, false),
            AccountMeta::new(reward_mint, false),
            AccountMeta::new(stake_mint, false),
            AccountMeta::new(sender, false),
            AccountMeta::new(recipient, false),
            AccountMeta::new(pool_address, false),
            AccountMeta::new(pool_tokens, false),
            AccountMeta::new(stake_address, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
        data: Deposit {
            pool_id: pool_id.to_le_bytes(),
            amount: amount.to_le_bytes(),
        }
        .to_bytes(),
    }
}

pub fn withdraw(
    signer: Pubkey,
    reward_mint: Pubkey,
    stake_mint: Pubkey,
    pool_id: u64,
    amount: u64,
) -> Instruction {
    let config_address = config_pda().0;
    let treasury_address = treasury_pda().0;
    let treasury_tokens = treasury_tokens_address(&reward_mint);
    let pool_address = pool_pda(pool_id).0;
    let pool_tokens = pool_tokens_address(pool_id, &stake_mint);
    let stake_address = stake_pda(signer, pool_id).0;
    let recipient = get_associated_token_address(&signer, &stake_mint);
    let reward_recipient = get_associated_token_address(&signer, &reward_mint);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(config_address, false),
            AccountMeta::new(treasury_address, false),
            AccountMeta::new(treasury_tokens, false),
            AccountMeta::new(reward_mint, false),
            AccountMeta::new(stake_mint, false),
            AccountMeta::new(recipient, false),
            AccountMeta::new(reward_recipient, false),
            AccountMeta::new(pool_address, false),
            AccountMeta::new(pool_tokens, false),
            AccountMeta::new(stake_address, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
        data: Withdraw {
            pool_id: pool_id.to_le_bytes(),
            amount: amount.to_le_bytes(),
        }
        .to_bytes(),
    }
}

/// Settle pending rewards without touching the staked balance.
pub fn claim(signer: Pubkey, reward_mint: Pubkey, pool_id: u64) -> Instruction {
    let config_address = config_pda().0;
    let treasury_address = treasury_pda().0;
    let treasury_tokens = treasury_tokens_address(&reward_mint);
    let pool_address = pool_pda(pool_id).0;
    let stake_address = stake_pda(signer, pool_id).0;
    let recipient = get_associated_token_address(&signer, &reward_mint);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(config_address, false),
            AccountMeta::new(treasury_address, false),
            AccountMeta::new(treasury_tokens, false),
            AccountMeta::new(reward_mint, false),
            AccountMeta::new(recipient, false),
            AccountMeta::new(pool_address, false),
            AccountMeta::new(stake_address, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
        data: Claim {
            pool_id: pool_id.to_le_bytes(),
        }
        .to_bytes(),
    }
}
