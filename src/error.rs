use thiserror::Error;

use crate::host::HostAddress;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Host Version Errors
/// - [`Error::UnsupportedVersion`] - The running game is not the supported build
/// - [`Error::NotSupported`] - The host executable carries no usable version resource
/// - [`Error::Malformed`] - The host executable's version resource is damaged
///
/// ## Host Memory Errors
/// - [`Error::InvalidAddress`] - Null or unmapped host address
/// - [`Error::AccessDenied`] - Write to memory that may not be modified
/// - [`Error::OutOfBounds`] - Access crossing the end of a mapped region
///
/// ## Installation Errors
/// - [`Error::PatchFailed`] - A hook could not be written into the host
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::GoblinErr`] - PE parsing errors from the goblin crate
///
/// # Examples
///
/// ```rust
/// use bulldoze_extensions::{patch::check_version, Error};
///
/// match check_version(640, 641) {
///     Err(Error::UnsupportedVersion { found, .. }) => assert_eq!(found, 640),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The host is not the build this crate was written against.
    ///
    /// Installation is refused entirely; the game keeps its default bulldoze
    /// behavior.
    #[error("Unsupported game version: {found}")]
    UnsupportedVersion {
        /// The build number detected in the running executable
        found: u16,
        /// The only build that is supported
        expected: u16,
    },

    /// A hook could not be written into the host.
    ///
    /// Hooks installed before the failing one stay in place.
    #[error("Failed to patch {address}: {message}")]
    PatchFailed {
        /// The host address that was being patched
        address: HostAddress,
        /// Description of the underlying failure
        message: String,
    },

    /// A host address was null or does not belong to any mapped memory.
    #[error("Invalid host address {0}")]
    InvalidAddress(HostAddress),

    /// The memory at this address may not be written.
    #[error("Access denied writing to {0}")]
    AccessDenied(HostAddress),

    /// An access would have crossed the end of a mapped region.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The host executable is damaged and its version could not be read.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The host executable carries no version resource.
    #[error("This file type is not supported")]
    NotSupported,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// Generic error for miscellaneous failures, such as a logger that was
    /// already initialized.
    #[error("{0}")]
    Error(String),

    /// Failed to lock the process-wide extension state.
    #[error("Failed to lock target")]
    LockError,
}
