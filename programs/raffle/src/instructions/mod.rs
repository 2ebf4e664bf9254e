pub mod admin;
pub mod enter_raffle;
pub mod fulfill_randomness;
pub mod perform_upkeep;
pub mod retry_payout;
pub mod snapshot;

pub use admin::*;
pub use enter_raffle::*;
pub use fulfill_randomness::*;
pub use perform_upkeep::*;
pub use retry_payout::*;
pub use snapshot::*;
