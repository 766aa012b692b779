mod add_pool;
mod claim;
mod deposit;
mod fund;
mod initialize;
mod log;
mod set_admin;
mod set_pool_weight;
mod withdraw;

use add_pool::*;
use claim::*;
use deposit::*;
use fund::*;
use initialize::*;
use log::*;
use set_admin::*;
use set_pool_weight::*;
use withdraw::*;

use harvest_api::instruction::*;
use steel::*;

pub fn process_instruction<'a>(
    program_id: &Pubkey,
    accounts: &'a [AccountInfo<'a>],
    data: &[u8],
) -> ProgramResult {
    let (ix, data) = parse_instruction(&harvest_api::ID, program_id, data)?;

    match ix {
        // Admin
        HarvestInstruction::Initialize => process_initialize(accounts, data)?,
        HarvestInstruction::AddPool => process_add_pool(accounts, data)?,
        HarvestInstruction::SetPoolWeight => process_set_pool_weight(accounts, data)?,
        HarvestInstruction::Fund => process_fund(accounts, data)?,
        HarvestInstruction::SetAdmin => process_set_admin(accounts, data)?,
        HarvestInstruction::Log => process_log(accounts, data)?,

        // Staker
        HarvestInstruction::Deposit => process_deposit(accounts, data)?,
        HarvestInstruction::Withdraw => process_withdraw(accounts, data)?,
        HarvestInstruction::Claim => process_claim(accounts, data)?,
    }

    Ok(())
}

entrypoint!(process_instruction);
