mod config;
pub mod logging;

pub use config::{
    DEFAULT_CHMOD_MASK, DEFAULT_LOOSE_TIME_PRECISION_SECS, DEFAULT_TIME_PRECISION_SECS,
    PROGRAM_LOG_LEVEL, PROGRAM_NAME,
};

pub use logging::init;
