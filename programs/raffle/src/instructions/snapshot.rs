use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::state::{Raffle, RaffleSnapshot};

#[derive(Accounts)]
pub struct GetRaffleSnapshot<'info> {
    #[account(seeds = [RAFFLE_SEED], bump = raffle.bump)]
    pub raffle: Account<'info, Raffle>,
}

/// Returns the committed raffle state for display.
pub fn process_get_raffle_snapshot(ctx: Context<GetRaffleSnapshot>) -> Result<RaffleSnapshot> {
    Ok(ctx.accounts.raffle.snapshot())
}
