use anchor_lang::prelude::*;

use crate::controller::RaffleObserver;
use crate::state::{Raffle, RaffleState};
use crate::upkeep::UpkeepStatus;

#[event]
pub struct RaffleInitialized {
    pub authority: Pubkey,
    pub entrance_fee: u64,
    pub interval: i64,
    pub timestamp: i64,
}

#[event]
pub struct RaffleEntered {
    pub player: Pubkey,
    pub amount: u64,
    pub player_count: u32,
}

/// Poll result when no draw was started. Mirrors the fields a keeper needs to
/// see why.
#[event]
pub struct UpkeepNotNeeded {
    pub pot: u64,
    pub player_count: u32,
    pub state: RaffleState,
    pub status: UpkeepStatus,
}

#[event]
pub struct RandomnessRequested {
    pub request: Pubkey,
    pub player_count: u32,
    pub pot: u64,
}

#[event]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub payout: u64,
    pub last_timestamp: i64,
    pub round: u64,
}

/// The winner is resolved but unpaid. Needs `retry_payout` from the authority.
#[event]
pub struct PayoutFailed {
    pub winner: Pubkey,
    pub amount: u64,
    pub request: Pubkey,
}

#[event]
pub struct StaleFulfillmentIgnored {
    pub request: Pubkey,
    pub pending: Option<Pubkey>,
}

#[event]
pub struct DrawCancelled {
    pub request: Pubkey,
    pub requested_at: i64,
}

/// Publishes lifecycle notifications as program logs and Anchor events.
pub struct ProgramEvents;

impl RaffleObserver for ProgramEvents {
    fn entry_recorded(&mut self, player: Pubkey, amount: u64, player_count: u32) {
        msg!("Entered raffle: player={}, players={}", player, player_count);
        emit!(RaffleEntered {
            player,
            amount,
            player_count,
        });
    }

    fn upkeep_not_needed(&mut self, raffle: &Raffle, status: UpkeepStatus) {
        msg!(
            "Upkeep not needed: pot={}, players={}, state={:?}",
            raffle.pot,
            raffle.player_count(),
            raffle.state
        );
        emit!(UpkeepNotNeeded {
            pot: raffle.pot,
            player_count: raffle.player_count(),
            state: raffle.state,
            status,
        });
    }

    fn randomness_requested(&mut self, request: Pubkey, player_count: u32, pot: u64) {
        msg!("Requested randomness {}", request);
        emit!(RandomnessRequested {
            request,
            player_count,
            pot,
        });
    }

    fn winner_picked(&mut self, winner: Pubkey, payout: u64, last_timestamp: i64, round: u64) {
        msg!("Winner: {}, paid {} lamports", winner, payout);
        emit!(WinnerPicked {
            winner,
            payout,
            last_timestamp,
            round,
        });
    }

    fn payout_failed(&mut self, winner: Pubkey, amount: u64, request: Pubkey) {
        msg!(
            "FATAL: payout of {} lamports to {} failed, raffle held for retry_payout",
            amount,
            winner
        );
        emit!(PayoutFailed {
            winner,
            amount,
            request,
        });
    }

    fn stale_fulfillment(&mut self, request: Pubkey, pending: Option<Pubkey>) {
        msg!(
            "Ignoring fulfillment for {}, pending request is {:?}",
            request,
            pending
        );
        emit!(StaleFulfillmentIgnored { request, pending });
    }

    fn draw_cancelled(&mut self, request: Pubkey, requested_at: i64) {
        msg!("Cancelled draw {} requested at {}", request, requested_at);
        emit!(DrawCancelled {
            request,
            requested_at,
        });
    }
}
