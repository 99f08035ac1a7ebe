use core::fmt;

use crate::status::LinkStatus;

/// Why a manager operation failed.
///
/// `E` is the error type of the underlying [`RadioLink`](crate::RadioLink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WifiError<E> {
    /// The driver has not been initialized, or was shut down.
    NotInitialized,

    /// The link is in a state that does not allow the operation.
    InvalidState(LinkStatus),

    /// The radio refused the request.
    Rejected(E),

    /// The link did not come up in time. Holds the last status seen.
    Timeout(LinkStatus),
}

impl<E> WifiError<E> {
    /// Link status observed when the operation gave up, if known.
    pub fn status(&self) -> Option<LinkStatus> {
        match self {
            WifiError::NotInitialized => Some(LinkStatus::NotInitialized),
            WifiError::InvalidState(status) | WifiError::Timeout(status) => Some(*status),
            WifiError::Rejected(_) => None,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for WifiError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WifiError::NotInitialized => write!(f, "Wi-Fi not initialized."),
            WifiError::InvalidState(status) => write!(f, "Operation not allowed while {status}."),
            WifiError::Rejected(err) => write!(f, "Request rejected by the radio: {err:?}."),
            WifiError::Timeout(status) => write!(f, "Timed out, link is {status}."),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for WifiError<E> {}
