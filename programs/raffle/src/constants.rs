/// Seed of the raffle PDA. The PDA is both the round state and the pot vault.
pub const RAFFLE_SEED: &[u8] = b"raffle";

/// Upper bound on entries per round. Must match `#[max_len]` on `Raffle::players`.
pub const MAX_PLAYERS: usize = 100;

/// Random words requested per draw. Switchboard On-Demand reveals one 32-byte value.
pub const NUM_WORDS: u32 = 1;

/// How long a draw may wait for its reveal before the authority can cancel it.
pub const DRAW_TIMEOUT_SECONDS: i64 = 3_600;
