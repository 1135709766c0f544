/// Decimals of every integer the caller hands in or reads back (wei).
pub const WAD_DECIMALS: u8        = 18;
pub const WAD: u128               = 1_000_000_000_000_000_000;

/// Default cap on the decay exponent `λ·T`, as an 18-decimal integer (10.0).
pub const MAX_TIME_EXPONENT: u128 = 10 * WAD;

/// Width of the encoded result: one ABI word.
pub const RESULT_BYTES: usize     = 32;
pub const RESULT_PREFIX: &str     = "0x";

// Argument names as they appear on the command line
pub const ARG_SCALE_FACTOR: &str        = "scale_factor";
pub const ARG_DECAY_CONSTANT: &str      = "decay_constant";
pub const ARG_INITIAL_PRICE: &str       = "initial_price";
pub const ARG_NUM_TOTAL_PURCHASES: &str = "num_total_purchases";
pub const ARG_TIME_SINCE_START: &str    = "time_since_start";
pub const ARG_QUANTITY: &str            = "quantity";
pub const ARG_EMISSION_RATE: &str       = "emission_rate";
