use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::controller::{self, FulfillmentOutcome};
use crate::custody::LamportVault;
use crate::error::{is_raffle_error, RaffleError};
use crate::events::ProgramEvents;
use crate::oracle::reveal_random_words;
use crate::state::Raffle;

/// Accounts required to deliver revealed randomness and pay the winner.
///
/// The winner's account must be passed writable in `remaining_accounts`.
/// Keepers learn it by simulating the reveal; passing every player also works
/// for small rounds.
#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    /// Account paying for any transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account; pays out the pot.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// The randomness oracle account committed by `perform_upkeep`.
    /// CHECK: Matched against the pending request and parsed within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Resolves the winner from the revealed randomness and pays the pot.
///
/// A reveal for anything but the pending request is logged and ignored. A
/// failed payout commits the resolved winner and leaves the raffle waiting for
/// `retry_payout`.
pub fn process_fulfill_randomness<'info>(
    ctx: Context<'_, '_, '_, 'info, FulfillRandomness<'info>>,
) -> Result<()> {
    ignore_stale_fulfillment(fulfill(ctx))
}

fn fulfill<'info>(
    ctx: Context<'_, '_, '_, 'info, FulfillRandomness<'info>>,
) -> Result<FulfillmentOutcome> {
    let request = ctx.accounts.randomness_account_data.key();
    // A stale account may never reveal; reject it before reading the value.
    controller::ensure_pending_request(&ctx.accounts.raffle, request, &mut ProgramEvents)?;

    let clock = Clock::get()?;
    let random_words =
        reveal_random_words(&ctx.accounts.randomness_account_data.to_account_info(), &clock)?;

    let raffle_info = ctx.accounts.raffle.to_account_info();
    let rent_floor = Rent::get()?.minimum_balance(raffle_info.data_len());
    let mut vault = LamportVault::new(
        raffle_info,
        ctx.accounts.system_program.to_account_info(),
        ctx.remaining_accounts,
        rent_floor,
    );

    controller::on_randomness_fulfilled(
        &mut ctx.accounts.raffle,
        request,
        &random_words,
        clock.unix_timestamp,
        &mut vault,
        &mut ProgramEvents,
    )
}

/// Stale deliveries succeed without changes so the keeper's transaction
/// lands; every other error reverts.
fn ignore_stale_fulfillment(result: Result<FulfillmentOutcome>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if is_raffle_error(&err, RaffleError::UnknownOrStaleRequest) => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_delivery_succeeds() {
        assert!(ignore_stale_fulfillment(err!(RaffleError::UnknownOrStaleRequest)).is_ok());
    }

    #[test]
    fn unrevealed_randomness_reverts() {
        let err = ignore_stale_fulfillment(err!(RaffleError::RandomnessNotResolved)).unwrap_err();
        assert!(is_raffle_error(&err, RaffleError::RandomnessNotResolved));

        let err = ignore_stale_fulfillment(err!(RaffleError::WinnerAccountMissing)).unwrap_err();
        assert!(is_raffle_error(&err, RaffleError::WinnerAccountMissing));
    }

    #[test]
    fn settled_outcomes_succeed() {
        let winner = Pubkey::new_unique();
        let paid = FulfillmentOutcome::Paid {
            winner,
            payout: 300,
        };
        assert!(ignore_stale_fulfillment(Ok(paid)).is_ok());
        assert!(ignore_stale_fulfillment(Ok(FulfillmentOutcome::PayoutPending {
            winner,
            amount: 300
        }))
        .is_ok());
    }
}
