use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::controller;
use crate::events::ProgramEvents;
use crate::oracle::SwitchboardOracle;
use crate::state::Raffle;
use crate::upkeep::UpkeepStatus;

/// Accounts required to start a draw.
///
/// Anyone may crank this; the draw only starts when it is due and the
/// randomness account was committed in the previous slot.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    /// The keeper paying transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Accounts required to poll whether a draw is due.
#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(seeds = [RAFFLE_SEED], bump = raffle.bump)]
    pub raffle: Account<'info, Raffle>,
}

/// Closes entries and commits the supplied randomness account as the draw's
/// request if a draw is due. Returns normally when it is not.
pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let clock = Clock::get()?;
    let randomness_account = ctx.accounts.randomness_account_data.to_account_info();
    let mut oracle = SwitchboardOracle::new(&randomness_account, &clock);

    controller::check_and_maybe_initiate_draw(
        &mut ctx.accounts.raffle,
        clock.unix_timestamp,
        &mut oracle,
        &mut ProgramEvents,
    )?;

    Ok(())
}

/// Read-only poll for keepers: which draw conditions hold right now.
pub fn process_check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
    let clock = Clock::get()?;
    Ok(UpkeepStatus::evaluate(&ctx.accounts.raffle, clock.unix_timestamp))
}
