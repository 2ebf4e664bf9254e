use anchor_lang::prelude::*;

use crate::constants::MAX_PLAYERS;
use crate::custody::FundCustody;
use crate::error::RaffleError;
use crate::oracle::{reduce_word, RandomWord};
use crate::state::{Raffle, RaffleState};

impl Raffle {
    /// Checks that an entry paying `amount` would be accepted.
    pub fn validate_entry(&self, amount: u64) -> Result<()> {
        require!(
            self.state == RaffleState::Open,
            RaffleError::RoundNotAcceptingEntries
        );
        require!(
            amount >= self.entrance_fee,
            RaffleError::InsufficientEntryFee
        );
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);
        self.pot
            .checked_add(amount)
            .ok_or(RaffleError::MathOverflow)?;
        Ok(())
    }

    /// Appends `player` and adds `amount` to the pot. Returns the new player count.
    pub fn record_entry(&mut self, player: Pubkey, amount: u64) -> Result<u32> {
        self.validate_entry(amount)?;
        let pot = self
            .pot
            .checked_add(amount)
            .ok_or(RaffleError::MathOverflow)?;

        self.players.push(player);
        self.pot = pot;

        Ok(self.player_count())
    }

    /// Picks the player at `random_word mod players.len()`.
    pub fn resolve_winner(&self, random_word: &RandomWord) -> Result<Pubkey> {
        require!(!self.players.is_empty(), RaffleError::NoPlayers);
        let index = reduce_word(random_word, self.players.len() as u64) as usize;
        Ok(self.players[index])
    }

    /// Pays the whole pot to `winner` and clears the round.
    ///
    /// Nothing changes unless the transfer succeeds.
    pub fn payout_and_reset<C: FundCustody>(
        &mut self,
        winner: Pubkey,
        now: i64,
        custody: &mut C,
    ) -> Result<u64> {
        require!(self.pot > 0, RaffleError::NothingToPayOut);
        let payout = self.pot;

        custody.transfer(&winner, payout)?;

        self.recent_winner = Some(winner);
        self.players.clear();
        self.pot = 0;
        self.last_timestamp = now;

        Ok(payout)
    }
}
