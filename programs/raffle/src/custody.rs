use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::error::RaffleError;

/// Moves lamports into and out of the pot.
///
/// Implementations must either move the full amount or nothing at all and
/// report which one happened.
pub trait FundCustody {
    /// Credits `amount` from `from` into the pot.
    fn deposit(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Pays `amount` out of the pot to `to`.
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Custody backed by the lamports of the raffle PDA itself.
///
/// `accounts` holds the counterparties the instruction was given: the paying
/// player for deposits, the candidate winners for payouts.
pub struct LamportVault<'a, 'info> {
    vault: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    accounts: &'a [AccountInfo<'info>],
    rent_floor: u64,
}

impl<'a, 'info> LamportVault<'a, 'info> {
    pub fn new(
        vault: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        accounts: &'a [AccountInfo<'info>],
        rent_floor: u64,
    ) -> Self {
        Self {
            vault,
            system_program,
            accounts,
            rent_floor,
        }
    }

    fn counterparty(&self, key: &Pubkey) -> Option<&AccountInfo<'info>> {
        self.accounts.iter().find(|account| account.key == key)
    }
}

impl<'a, 'info> FundCustody for LamportVault<'a, 'info> {
    fn deposit(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let payer = self
            .counterparty(from)
            .filter(|account| account.is_signer)
            .ok_or(RaffleError::Unauthorized)?
            .clone();

        system_program::transfer(
            CpiContext::new(
                self.system_program.clone(),
                system_program::Transfer {
                    from: payer,
                    to: self.vault.clone(),
                },
            ),
            amount,
        )
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let Some(recipient) = self.counterparty(to).filter(|account| account.is_writable) else {
            msg!("Winner account {} was not supplied as writable", to);
            return err!(RaffleError::WinnerAccountMissing);
        };

        let remaining = self
            .vault
            .lamports()
            .checked_sub(amount)
            .filter(|remaining| *remaining >= self.rent_floor);
        let credited = recipient.lamports().checked_add(amount);

        let (Some(remaining), Some(credited)) = (remaining, credited) else {
            msg!(
                "Vault holds {} lamports, cannot pay {} above rent floor {}",
                self.vault.lamports(),
                amount,
                self.rent_floor
            );
            return err!(RaffleError::PayoutFailed);
        };

        **self.vault.try_borrow_mut_lamports()? = remaining;
        **recipient.try_borrow_mut_lamports()? = credited;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller;
    use crate::events::ProgramEvents;
    use crate::state::{Raffle, RaffleState};

    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl TestAccount {
        fn new(lamports: u64) -> Self {
            Self {
                key: Pubkey::new_unique(),
                owner: crate::ID,
                lamports,
                data: vec![],
            }
        }

        fn info(&mut self, is_signer: bool, is_writable: bool) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                is_signer,
                is_writable,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    #[test]
    fn transfer_moves_pot_to_winner() {
        let mut vault = TestAccount::new(1_300);
        let mut system = TestAccount::new(1);
        let mut winner = TestAccount::new(50);
        let winner_key = winner.key;

        {
            let accounts = [winner.info(false, true)];
            let mut custody = LamportVault::new(
                vault.info(false, true),
                system.info(false, false),
                &accounts,
                1_000,
            );
            custody.transfer(&winner_key, 300).unwrap();
        }

        assert_eq!(vault.lamports, 1_000);
        assert_eq!(winner.lamports, 350);
    }

    #[test]
    fn transfer_refuses_missing_winner() {
        let mut vault = TestAccount::new(1_300);
        let mut system = TestAccount::new(1);
        let mut other = TestAccount::new(50);

        {
            let accounts = [other.info(false, true)];
            let mut custody = LamportVault::new(
                vault.info(false, true),
                system.info(false, false),
                &accounts,
                1_000,
            );
            let err = custody.transfer(&Pubkey::new_unique(), 300).unwrap_err();
            assert!(crate::error::is_raffle_error(&err, RaffleError::WinnerAccountMissing));
        }

        assert_eq!(vault.lamports, 1_300);
        assert_eq!(other.lamports, 50);
    }

    #[test]
    fn transfer_refuses_read_only_winner() {
        let mut vault = TestAccount::new(1_300);
        let mut system = TestAccount::new(1);
        let mut winner = TestAccount::new(50);
        let winner_key = winner.key;

        {
            let accounts = [winner.info(false, false)];
            let mut custody = LamportVault::new(
                vault.info(false, true),
                system.info(false, false),
                &accounts,
                1_000,
            );
            let err = custody.transfer(&winner_key, 300).unwrap_err();
            assert!(crate::error::is_raffle_error(&err, RaffleError::WinnerAccountMissing));
        }

        assert_eq!(vault.lamports, 1_300);
        assert_eq!(winner.lamports, 50);
    }

    #[test]
    fn transfer_never_dips_into_rent_reserve() {
        let mut vault = TestAccount::new(1_200);
        let mut system = TestAccount::new(1);
        let mut winner = TestAccount::new(0);
        let winner_key = winner.key;

        {
            let accounts = [winner.info(false, true)];
            let mut custody = LamportVault::new(
                vault.info(false, true),
                system.info(false, false),
                &accounts,
                1_000,
            );
            let err = custody.transfer(&winner_key, 300).unwrap_err();
            assert!(crate::error::is_raffle_error(&err, RaffleError::PayoutFailed));
        }

        assert_eq!(vault.lamports, 1_200);
        assert_eq!(winner.lamports, 0);
    }

    #[test]
    fn deposit_requires_signing_payer() {
        let mut vault = TestAccount::new(1_000);
        let mut system = TestAccount::new(1);
        let mut player = TestAccount::new(500);
        let player_key = player.key;

        let accounts = [player.info(false, true)];
        let mut custody = LamportVault::new(
            vault.info(false, true),
            system.info(false, false),
            &accounts,
            1_000,
        );
        let err = custody.deposit(&player_key, 100).unwrap_err();
        assert!(crate::error::is_raffle_error(&err, RaffleError::Unauthorized));
    }

    #[test]
    fn fulfillment_without_winner_account_reverts() {
        let mut raffle = Raffle::new(Pubkey::new_unique(), 255, 100, 30, 1_000);
        for _ in 0..3 {
            raffle.record_entry(Pubkey::new_unique(), 100).unwrap();
        }
        let request = Pubkey::new_unique();
        raffle.state = RaffleState::Calculating;
        raffle.pending_request = Some(request);

        let mut vault = TestAccount::new(1_300);
        let mut system = TestAccount::new(1);
        {
            let mut custody = LamportVault::new(
                vault.info(false, true),
                system.info(false, false),
                &[],
                1_000,
            );
            let err = controller::on_randomness_fulfilled(
                &mut raffle,
                request,
                &[[7u8; 32]],
                2_000,
                &mut custody,
                &mut ProgramEvents,
            )
            .unwrap_err();
            assert!(crate::error::is_raffle_error(&err, RaffleError::WinnerAccountMissing));
        }

        assert_eq!(vault.lamports, 1_300);
        assert_eq!(raffle.state, RaffleState::Calculating);
        assert_eq!(raffle.pending_request, Some(request));
        assert_eq!(raffle.pending_winner, None);
        assert_eq!(raffle.players.len(), 3);
        assert_eq!(raffle.pot, 300);
    }
}
