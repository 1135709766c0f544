pub mod config;
pub mod consts;
pub mod curve;
pub mod encoding;
pub mod error;
pub mod instruction;
pub mod math;
pub mod oracle;
pub mod state;
pub mod utils;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::consts::*;
    pub use crate::curve::*;
    pub use crate::encoding::*;
    pub use crate::error::*;
    pub use crate::instruction::*;
    pub use crate::math::{PreciseNumber, U256};
    pub use crate::oracle::*;
    pub use crate::state::*;
    pub use crate::utils::*;
}
