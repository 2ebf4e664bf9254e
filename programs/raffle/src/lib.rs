use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod controller;
pub mod custody;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod oracle;
pub mod state;
pub mod upkeep;

use state::RaffleSnapshot;
use upkeep::UpkeepStatus;

declare_id!("9sTpDANVX7rdrzGyLqvLBuS7PJxCrs9RF1FGTeTbSiey");

#[program]
pub mod raffle {
    use super::*;

    pub fn initialize_raffle(
        ctx: Context<InitializeRaffle>,
        entrance_fee: u64,
        interval: i64,
    ) -> Result<()> {
        process_initialize_raffle(ctx, entrance_fee, interval)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        process_enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
        process_check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        process_perform_upkeep(ctx)
    }

    pub fn fulfill_randomness<'info>(
        ctx: Context<'_, '_, '_, 'info, FulfillRandomness<'info>>,
    ) -> Result<()> {
        process_fulfill_randomness(ctx)
    }

    pub fn retry_payout(ctx: Context<RetryPayout>) -> Result<()> {
        process_retry_payout(ctx)
    }

    pub fn cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
        process_cancel_draw(ctx)
    }

    pub fn get_raffle_snapshot(ctx: Context<GetRaffleSnapshot>) -> Result<RaffleSnapshot> {
        process_get_raffle_snapshot(ctx)
    }
}
