use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::controller;
use crate::custody::LamportVault;
use crate::error::RaffleError;
use crate::events::ProgramEvents;
use crate::state::Raffle;

/// Accounts required to retry a failed payout.
///
/// Ensures:
/// 1. Only the raffle authority can retry.
/// 2. The recipient is the winner already resolved for this draw.
#[derive(Accounts)]
pub struct RetryPayout<'info> {
    pub authority: Signer<'info>,

    /// The raffle state account.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
        has_one = authority @ RaffleError::Unauthorized,
    )]
    pub raffle: Account<'info, Raffle>,

    /// The resolved winner receiving the pot.
    /// CHECK: Only receives lamports; must equal `raffle.pending_winner`.
    #[account(
        mut,
        constraint = raffle.pending_winner == Some(winner.key()) @ RaffleError::NoPendingPayout
    )]
    pub winner: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Pays the pot to the winner resolved by an earlier fulfillment whose
/// transfer failed, then reopens the raffle. Randomness is not re-read.
pub fn process_retry_payout(ctx: Context<RetryPayout>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle_info = ctx.accounts.raffle.to_account_info();
    let rent_floor = Rent::get()?.minimum_balance(raffle_info.data_len());
    let counterparties = [ctx.accounts.winner.to_account_info()];
    let mut vault = LamportVault::new(
        raffle_info,
        ctx.accounts.system_program.to_account_info(),
        &counterparties,
        rent_floor,
    );

    let payout = controller::retry_payout(
        &mut ctx.accounts.raffle,
        clock.unix_timestamp,
        &mut vault,
        &mut ProgramEvents,
    )?;
    msg!("Retried payout of {} lamports succeeded", payout);

    Ok(())
}
