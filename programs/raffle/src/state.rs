use anchor_lang::prelude::*;

/// Phase of the current round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RaffleState {
    /// Accepting entries.
    Open,
    /// Entries closed while a randomness request is outstanding.
    Calculating,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct Raffle {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Operator allowed to retry a failed payout or cancel a stuck draw.
    pub authority: Pubkey,

    pub state: RaffleState,

    /// Lamports required per entry. Fixed at initialization.
    pub entrance_fee: u64,

    /// Seconds that must pass between draws. Fixed at initialization.
    pub interval: i64,

    /// UNIX timestamp of initialization or of the last paid-out draw.
    pub last_timestamp: i64,

    /// Lamports collected this round. The lamports themselves sit on this
    /// account, on top of its rent-exempt reserve.
    pub pot: u64,

    /// Entrants in order of entry. Index into this list is the winning slot;
    /// a player entering twice holds two slots.
    #[max_len(100)]
    pub players: Vec<Pubkey>,

    /// Switchboard randomness account committed for the in-flight draw.
    pub pending_request: Option<Pubkey>,

    /// UNIX timestamp at which `pending_request` was dispatched.
    pub requested_at: i64,

    /// Winner resolved by a fulfillment whose payout failed.
    pub pending_winner: Option<Pubkey>,

    pub recent_winner: Option<Pubkey>,

    /// Completed draws.
    pub round: u64,
}

impl Raffle {
    pub fn new(authority: Pubkey, bump: u8, entrance_fee: u64, interval: i64, now: i64) -> Self {
        Self {
            bump,
            authority,
            state: RaffleState::Open,
            entrance_fee,
            interval,
            last_timestamp: now,
            pot: 0,
            players: Vec::new(),
            pending_request: None,
            requested_at: 0,
            pending_winner: None,
            recent_winner: None,
            round: 0,
        }
    }

    pub fn player_count(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn snapshot(&self) -> RaffleSnapshot {
        RaffleSnapshot {
            entrance_fee: self.entrance_fee,
            state: self.state,
            player_count: self.player_count(),
            recent_winner: self.recent_winner,
            interval: self.interval,
            last_timestamp: self.last_timestamp,
            pot: self.pot,
            round: self.round,
        }
    }
}

/// Read-only view of the raffle returned to clients.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RaffleSnapshot {
    pub entrance_fee: u64,
    pub state: RaffleState,
    pub player_count: u32,
    pub recent_winner: Option<Pubkey>,
    pub interval: i64,
    pub last_timestamp: i64,
    pub pot: u64,
    pub round: u64,
}
