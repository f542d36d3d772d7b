use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while building a button ladder. Decoding itself never fails.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// More than [crate::MAX_BUTTONS] values were given.
    #[display("{count} buttons requested, more than fit on one pin")]
    TooManyButtons { count: usize },
}
