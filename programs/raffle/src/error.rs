use anchor_lang::error::{Error, ERROR_CODE_OFFSET};
use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    #[msg("Entrance fee must be greater than zero")]
    InvalidEntranceFee,
    #[msg("Draw interval must be greater than zero")]
    InvalidInterval,
    #[msg("Paid amount is below the entrance fee")]
    InsufficientEntryFee,
    #[msg("Raffle is calculating a winner and not accepting entries")]
    RoundNotAcceptingEntries,
    #[msg("Raffle has reached the maximum number of entries")]
    RaffleFull,
    #[msg("Raffle has no players")]
    NoPlayers,
    #[msg("Pot is empty")]
    NothingToPayOut,
    #[msg("Randomness request could not be submitted")]
    OracleUnavailable,
    #[msg("Randomness has not been revealed yet")]
    RandomnessNotResolved,
    #[msg("Fulfillment does not match the pending randomness request")]
    UnknownOrStaleRequest,
    #[msg("Fulfillment carried no random words")]
    EmptyRandomness,
    #[msg("Transfer of the pot to the winner failed")]
    PayoutFailed,
    #[msg("Winner account was not supplied as writable")]
    WinnerAccountMissing,
    #[msg("No resolved winner is waiting for payout")]
    NoPendingPayout,
    #[msg("A resolved winner is waiting for payout")]
    PayoutPending,
    #[msg("No draw is in progress")]
    DrawNotInProgress,
    #[msg("Draw has not timed out yet")]
    DrawNotStale,
    #[msg("Not authorized")]
    Unauthorized,
    #[msg("Math overflow")]
    MathOverflow,
}

/// Returns true if `err` was raised from `expected`, ignoring where it was raised.
pub fn is_raffle_error(err: &Error, expected: RaffleError) -> bool {
    match err {
        Error::AnchorError(anchor_error) => {
            anchor_error.error_code_number == expected as u32 + ERROR_CODE_OFFSET
        }
        Error::ProgramError(_) => false,
    }
}
