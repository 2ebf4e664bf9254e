use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::error::RaffleError;

/// A 32-byte random value, read as a 256-bit big-endian unsigned integer.
pub type RandomWord = [u8; 32];

mod uint_types {
    use uint::construct_uint;

    construct_uint! {
        /// 256-bit unsigned integer
        pub struct U256(4);
    }
}
pub use uint_types::U256;

/// Source of verifiable randomness.
///
/// A request returns an id immediately; the random words arrive later through
/// `fulfill_randomness`, tagged with the same id.
pub trait RandomnessOracle {
    fn request_randomness(&mut self, num_words: u32) -> Result<Pubkey>;
}

/// Switchboard On-Demand commit/reveal.
///
/// The keeper commits a randomness account in the slot before `perform_upkeep`;
/// the account key becomes the request id. Once the oracle has revealed it, the
/// keeper hands the same account to `fulfill_randomness`.
pub struct SwitchboardOracle<'a, 'info> {
    randomness_account: &'a AccountInfo<'info>,
    clock: &'a Clock,
}

impl<'a, 'info> SwitchboardOracle<'a, 'info> {
    pub fn new(randomness_account: &'a AccountInfo<'info>, clock: &'a Clock) -> Self {
        Self {
            randomness_account,
            clock,
        }
    }
}

impl<'a, 'info> RandomnessOracle for SwitchboardOracle<'a, 'info> {
    fn request_randomness(&mut self, num_words: u32) -> Result<Pubkey> {
        require!(num_words == 1, RaffleError::OracleUnavailable);

        let randomness_data = RandomnessAccountData::parse(self.randomness_account.data.borrow())
            .map_err(|_| error!(RaffleError::OracleUnavailable))?;

        // Only a commit made in the previous slot has an unknown outcome.
        if randomness_data.seed_slot != self.clock.slot.saturating_sub(1) {
            msg!(
                "Randomness seed slot {} is not the previous slot {}",
                randomness_data.seed_slot,
                self.clock.slot.saturating_sub(1)
            );
            return err!(RaffleError::OracleUnavailable);
        }

        Ok(self.randomness_account.key())
    }
}

/// Reads the revealed value of a Switchboard randomness account.
pub fn reveal_random_words(
    randomness_account: &AccountInfo,
    clock: &Clock,
) -> Result<Vec<RandomWord>> {
    let randomness_data = RandomnessAccountData::parse(randomness_account.data.borrow())
        .map_err(|_| error!(RaffleError::RandomnessNotResolved))?;
    let revealed_random_value = randomness_data
        .get_value(clock)
        .map_err(|_| error!(RaffleError::RandomnessNotResolved))?;

    Ok(vec![revealed_random_value])
}

/// `word mod modulus` over the full 256 bits of `word`.
pub fn reduce_word(word: &RandomWord, modulus: u64) -> u64 {
    if modulus == 0 {
        return 0;
    }
    (U256::from_big_endian(word) % U256::from(modulus)).low_u64()
}

/// Big-endian word holding `value` in its low 8 bytes.
#[cfg(test)]
pub fn word_from_u64(value: u64) -> RandomWord {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reduce_small_word() {
        assert_eq!(reduce_word(&word_from_u64(7), 3), 1);
        assert_eq!(reduce_word(&word_from_u64(0), 5), 0);
        assert_eq!(reduce_word(&word_from_u64(u64::MAX), 1), 0);
    }

    #[test]
    fn reduce_uses_high_bytes() {
        // 2^248 mod 3 == 1 while the low bytes are all zero.
        let mut word = [0u8; 32];
        word[0] = 1;
        assert_eq!(reduce_word(&word, 3), 1);
        assert_eq!(reduce_word(&word, 256), 0);
    }

    #[test]
    fn reduce_all_ones() {
        // 2^256 - 1 is divisible by 3, 5 and 17.
        let word = [0xFF; 32];
        assert_eq!(reduce_word(&word, 3), 0);
        assert_eq!(reduce_word(&word, 5), 0);
        assert_eq!(reduce_word(&word, 17), 0);
        assert_eq!(reduce_word(&word, 7), 1);
    }

    proptest! {
        #[test]
        fn reduce_in_range(word in any::<[u8; 32]>(), modulus in 1u64..=u64::MAX) {
            prop_assert!(reduce_word(&word, modulus) < modulus);
        }

        #[test]
        fn reduce_matches_native_modulo(value in any::<u64>(), modulus in 1u64..=u64::MAX) {
            prop_assert_eq!(reduce_word(&word_from_u64(value), modulus), value % modulus);
        }

        #[test]
        fn reduce_low_half_matches_u128(high in any::<u128>(), modulus in 1u64..=u64::MAX) {
            let mut word = [0u8; 32];
            word[16..].copy_from_slice(&high.to_be_bytes());
            prop_assert_eq!(reduce_word(&word, modulus) as u128, high % modulus as u128);
        }
    }
}
