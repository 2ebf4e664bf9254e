use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::controller;
use crate::custody::LamportVault;
use crate::events::ProgramEvents;
use crate::state::Raffle;

/// Accounts required to enter the raffle.
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The player paying the entrance fee.
    #[account(mut)]
    pub player: Signer<'info>,

    /// Raffle state account; receives the fee.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// System program for the lamports transfer.
    pub system_program: Program<'info, System>,
}

/// Enters the caller into the current round.
///
/// Steps performed:
/// 1. Check that the round is open and `amount` covers the entrance fee.
/// 2. Transfer `amount` lamports from the player to the raffle.
/// 3. Append the player and add `amount` to the pot.
///
/// # Arguments
/// * `ctx` - Context containing EnterRaffle accounts
/// * `amount` - Lamports paid; at least the entrance fee
pub fn process_enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let counterparties = [ctx.accounts.player.to_account_info()];
    let mut vault = LamportVault::new(
        ctx.accounts.raffle.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        &counterparties,
        0,
    );

    controller::enter(
        &mut ctx.accounts.raffle,
        player,
        amount,
        &mut vault,
        &mut ProgramEvents,
    )?;

    Ok(())
}
