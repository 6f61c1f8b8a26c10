//! Process-wide default logger
//!
//! For call sites that cannot be handed a [`Logger`]. Set it once during
//! start-up; replacing it later only affects code that fetches it afterwards,
//! since [`default_logger`] hands out clones.

use super::logger::Logger;
use parking_lot::RwLock;

static DEFAULT_LOGGER: RwLock<Option<Logger>> = parking_lot::const_rwlock(None);

/// Install `logger` as the default, returning the previous one
pub fn set_default(logger: Logger) -> Option<Logger> {
    DEFAULT_LOGGER.write().replace(logger)
}

/// Remove the installed default, returning it
pub fn clear_default() -> Option<Logger> {
    DEFAULT_LOGGER.write().take()
}

/// The installed default, or [`Logger::default`] when none is installed
pub fn default_logger() -> Logger {
    DEFAULT_LOGGER.read().clone().unwrap_or_default()
}
