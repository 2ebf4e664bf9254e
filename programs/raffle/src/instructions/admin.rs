use anchor_lang::prelude::*;

use crate::constants::{DRAW_TIMEOUT_SECONDS, RAFFLE_SEED};
use crate::controller;
use crate::error::RaffleError;
use crate::events::{ProgramEvents, RaffleInitialized};
use crate::state::Raffle;

/// Accounts required to initialize the raffle.
/// The raffle PDA holds both the round state and the pot.
#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    /// The account paying for account creation; becomes the raffle authority.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account.
    #[account(
        init,
        payer = payer,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [RAFFLE_SEED],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts required to cancel a draw whose randomness never arrived.
#[derive(Accounts)]
pub struct CancelDraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
        has_one = authority @ RaffleError::Unauthorized,
    )]
    pub raffle: Account<'info, Raffle>,
}

/// Creates the raffle with a fixed entrance fee and draw interval.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeRaffle accounts
/// * `entrance_fee` - Lamports required per entry
/// * `interval` - Seconds between draws
pub fn process_initialize_raffle(
    ctx: Context<InitializeRaffle>,
    entrance_fee: u64,
    interval: i64,
) -> Result<()> {
    require!(entrance_fee > 0, RaffleError::InvalidEntranceFee);
    require!(interval > 0, RaffleError::InvalidInterval);

    let clock = Clock::get()?;
    let authority = ctx.accounts.payer.key();

    ctx.accounts.raffle.set_inner(Raffle::new(
        authority,
        ctx.bumps.raffle,
        entrance_fee,
        interval,
        clock.unix_timestamp,
    ));

    msg!(
        "Raffle initialized: fee={} lamports, interval={}s",
        entrance_fee,
        interval
    );
    emit!(RaffleInitialized {
        authority,
        entrance_fee,
        interval,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Reopens the raffle after a draw has waited `DRAW_TIMEOUT_SECONDS` without
/// a reveal. Players and pot carry over to the next draw.
pub fn process_cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
    let clock = Clock::get()?;
    controller::cancel_stale_draw(
        &mut ctx.accounts.raffle,
        clock.unix_timestamp,
        DRAW_TIMEOUT_SECONDS,
        &mut ProgramEvents,
    )
}
