use anchor_lang::prelude::*;

use crate::state::{Raffle, RaffleState};

/// Which of the draw conditions currently hold.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub time_passed: bool,
    pub is_open: bool,
    pub has_balance: bool,
    pub has_players: bool,
}

impl UpkeepStatus {
    pub fn evaluate(raffle: &Raffle, now: i64) -> Self {
        Self {
            time_passed: now.saturating_sub(raffle.last_timestamp) >= raffle.interval,
            is_open: raffle.state == RaffleState::Open,
            has_balance: raffle.pot > 0,
            has_players: !raffle.players.is_empty(),
        }
    }

    pub fn is_due(&self) -> bool {
        self.time_passed && self.is_open && self.has_balance && self.has_players
    }
}

/// Whether `perform_upkeep` would start a draw at `now`. Reads only.
pub fn is_draw_due(raffle: &Raffle, now: i64) -> bool {
    UpkeepStatus::evaluate(raffle, now).is_due()
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000;
    const INTERVAL: i64 = 30;

    fn funded_raffle() -> Raffle {
        let mut raffle = Raffle::new(Pubkey::new_unique(), 255, 100, INTERVAL, START);
        raffle.players.push(Pubkey::new_unique());
        raffle.pot = 100;
        raffle
    }

    #[test]
    fn due_when_all_conditions_hold() {
        let raffle = funded_raffle();
        assert!(is_draw_due(&raffle, START + INTERVAL));
        assert!(is_draw_due(&raffle, START + INTERVAL + 1_000));
    }

    #[test]
    fn not_due_before_interval() {
        let raffle = funded_raffle();
        let status = UpkeepStatus::evaluate(&raffle, START + INTERVAL - 1);
        assert!(!status.time_passed);
        assert!(status.is_open && status.has_balance && status.has_players);
        assert!(!status.is_due());
    }

    #[test]
    fn not_due_while_calculating() {
        let mut raffle = funded_raffle();
        raffle.state = RaffleState::Calculating;
        let status = UpkeepStatus::evaluate(&raffle, START + INTERVAL);
        assert!(!status.is_open);
        assert!(!status.is_due());
    }

    #[test]
    fn not_due_without_players() {
        let raffle = Raffle::new(Pubkey::new_unique(), 255, 100, INTERVAL, START);
        let status = UpkeepStatus::evaluate(&raffle, START + INTERVAL);
        assert_eq!(
            status,
            UpkeepStatus {
                time_passed: true,
                is_open: true,
                has_balance: false,
                has_players: false,
            }
        );
        assert!(!is_draw_due(&raffle, START + INTERVAL));
    }

    #[test]
    fn balance_and_players_are_checked_separately() {
        let mut raffle = funded_raffle();
        raffle.pot = 0;
        assert!(!is_draw_due(&raffle, START + INTERVAL));

        let mut raffle = funded_raffle();
        raffle.players.clear();
        assert!(!is_draw_due(&raffle, START + INTERVAL));
    }

    #[test]
    fn clock_behind_last_draw_is_not_due() {
        let raffle = funded_raffle();
        assert!(!is_draw_due(&raffle, START - 10));
    }
}
