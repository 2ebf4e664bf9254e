//! Round lifecycle: `Open -> Calculating -> Open`.
//!
//! Every function here takes the raffle by `&mut` and is called from inside a
//! single instruction, so the account write lock serializes them.

use anchor_lang::prelude::*;

use crate::constants::NUM_WORDS;
use crate::custody::FundCustody;
use crate::error::{is_raffle_error, RaffleError};
use crate::oracle::{RandomWord, RandomnessOracle};
use crate::state::{Raffle, RaffleState};
use crate::upkeep::{is_draw_due, UpkeepStatus};

/// Receives lifecycle notifications. Implementations must not fail.
pub trait RaffleObserver {
    fn entry_recorded(&mut self, player: Pubkey, amount: u64, player_count: u32);
    fn upkeep_not_needed(&mut self, raffle: &Raffle, status: UpkeepStatus);
    fn randomness_requested(&mut self, request: Pubkey, player_count: u32, pot: u64);
    fn winner_picked(&mut self, winner: Pubkey, payout: u64, last_timestamp: i64, round: u64);
    fn payout_failed(&mut self, winner: Pubkey, amount: u64, request: Pubkey);
    fn stale_fulfillment(&mut self, request: Pubkey, pending: Option<Pubkey>);
    fn draw_cancelled(&mut self, request: Pubkey, requested_at: i64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpkeepOutcome {
    NotNeeded(UpkeepStatus),
    Requested(Pubkey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    Paid { winner: Pubkey, payout: u64 },
    /// Winner resolved but the transfer failed; the round waits for `retry_payout`.
    PayoutPending { winner: Pubkey, amount: u64 },
}

/// Takes the entry fee from `player` and adds them to the round.
pub fn enter<C, N>(
    raffle: &mut Raffle,
    player: Pubkey,
    amount: u64,
    custody: &mut C,
    observer: &mut N,
) -> Result<u32>
where
    C: FundCustody,
    N: RaffleObserver,
{
    raffle.validate_entry(amount)?;
    custody.deposit(&player, amount)?;
    let player_count = raffle.record_entry(player, amount)?;

    observer.entry_recorded(player, amount, player_count);
    Ok(player_count)
}

/// Starts a draw if one is due. Safe to call as often as the keeper likes.
pub fn check_and_maybe_initiate_draw<O, N>(
    raffle: &mut Raffle,
    now: i64,
    oracle: &mut O,
    observer: &mut N,
) -> Result<UpkeepOutcome>
where
    O: RandomnessOracle,
    N: RaffleObserver,
{
    if !is_draw_due(raffle, now) {
        let status = UpkeepStatus::evaluate(raffle, now);
        observer.upkeep_not_needed(raffle, status);
        return Ok(UpkeepOutcome::NotNeeded(status));
    }

    // Close entries before the request leaves the program.
    raffle.state = RaffleState::Calculating;

    let request = match oracle.request_randomness(NUM_WORDS) {
        Ok(request) => request,
        Err(err) => {
            raffle.state = RaffleState::Open;
            msg!("Randomness request failed: {}", err);
            return err!(RaffleError::OracleUnavailable);
        }
    };

    raffle.pending_request = Some(request);
    raffle.requested_at = now;

    observer.randomness_requested(request, raffle.player_count(), raffle.pot);
    Ok(UpkeepOutcome::Requested(request))
}

/// Fails with `UnknownOrStaleRequest` unless `request` is the draw still
/// waiting for its randomness. Reads only.
pub fn ensure_pending_request<N: RaffleObserver>(
    raffle: &Raffle,
    request: Pubkey,
    observer: &mut N,
) -> Result<()> {
    let expected = raffle.state == RaffleState::Calculating
        && raffle.pending_request == Some(request)
        && raffle.pending_winner.is_none();
    if !expected {
        observer.stale_fulfillment(request, raffle.pending_request);
        return err!(RaffleError::UnknownOrStaleRequest);
    }
    Ok(())
}

/// Turns the oracle's words into a winner and pays them.
///
/// A transfer failure is not returned as an error: the resolved winner is
/// kept in `pending_winner` and the round stays `Calculating` until
/// [`retry_payout`] succeeds. A missing winner account is returned as
/// `WinnerAccountMissing` with nothing changed.
pub fn on_randomness_fulfilled<C, N>(
    raffle: &mut Raffle,
    request: Pubkey,
    random_words: &[RandomWord],
    now: i64,
    custody: &mut C,
    observer: &mut N,
) -> Result<FulfillmentOutcome>
where
    C: FundCustody,
    N: RaffleObserver,
{
    ensure_pending_request(raffle, request, observer)?;

    let random_word = random_words.first().ok_or(RaffleError::EmptyRandomness)?;
    let winner = raffle.resolve_winner(random_word)?;
    let amount = raffle.pot;

    match raffle.payout_and_reset(winner, now, custody) {
        Ok(payout) => {
            complete_draw(raffle, winner, payout, observer);
            Ok(FulfillmentOutcome::Paid { winner, payout })
        }
        // The caller left out the winner account; revert rather than strand the round.
        Err(err) if is_raffle_error(&err, RaffleError::WinnerAccountMissing) => Err(err),
        Err(err) => {
            msg!("Payout of {} to {} failed: {}", amount, winner, err);
            raffle.pending_winner = Some(winner);
            observer.payout_failed(winner, amount, request);
            Ok(FulfillmentOutcome::PayoutPending { winner, amount })
        }
    }
}

/// Re-attempts the transfer to the already resolved winner.
pub fn retry_payout<C, N>(
    raffle: &mut Raffle,
    now: i64,
    custody: &mut C,
    observer: &mut N,
) -> Result<u64>
where
    C: FundCustody,
    N: RaffleObserver,
{
    require!(
        raffle.state == RaffleState::Calculating,
        RaffleError::DrawNotInProgress
    );
    let winner = raffle.pending_winner.ok_or(RaffleError::NoPendingPayout)?;

    let payout = raffle.payout_and_reset(winner, now, custody)?;
    complete_draw(raffle, winner, payout, observer);
    Ok(payout)
}

/// Abandons a draw whose randomness never arrived. Players and pot carry over.
pub fn cancel_stale_draw<N>(
    raffle: &mut Raffle,
    now: i64,
    timeout: i64,
    observer: &mut N,
) -> Result<()>
where
    N: RaffleObserver,
{
    require!(
        raffle.state == RaffleState::Calculating,
        RaffleError::DrawNotInProgress
    );
    require!(raffle.pending_winner.is_none(), RaffleError::PayoutPending);
    require!(
        now.saturating_sub(raffle.requested_at) >= timeout,
        RaffleError::DrawNotStale
    );
    let request = raffle
        .pending_request
        .take()
        .ok_or(RaffleError::DrawNotInProgress)?;

    raffle.state = RaffleState::Open;

    observer.draw_cancelled(request, raffle.requested_at);
    Ok(())
}

fn complete_draw<N: RaffleObserver>(
    raffle: &mut Raffle,
    winner: Pubkey,
    payout: u64,
    observer: &mut N,
) {
    raffle.state = RaffleState::Open;
    raffle.pending_request = None;
    raffle.pending_winner = None;
    raffle.round = raffle.round.saturating_add(1);

    observer.winner_picked(winner, payout, raffle.last_timestamp, raffle.round);
}
