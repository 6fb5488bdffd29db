use std::error::Error as StdError;
use std::fmt;

/// The underlying cause carried by [Error::RemoteFetch]. The remote client
/// decides the concrete error type; this crate only surfaces it.
pub type ClientError = Box<dyn StdError + Send + Sync>;

/// Error represents the ways a repository construction or lookup can fail.
#[derive(Debug)]
pub enum Error {
    /// Configuration indicates the repository was constructed with invalid
    /// settings, e.g. a missing remote client handle or a cache expiry at or
    /// below the provider minimum.
    Configuration(String),
    /// RemoteFetch indicates the current template could not be retrieved from
    /// the provider. The transport, authentication or interruption cause is
    /// attached and available through [std::error::Error::source].
    RemoteFetch(ClientError),
    /// WriteNotSupported indicates the caller tried to persist flag state
    /// through this repository. The remote template is the source of truth
    /// and is edited through the provider's console or API, never from here.
    WriteNotSupported,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(reason) => {
                write!(f, "invalid repository configuration: {}", reason)
            }
            Error::RemoteFetch(cause) => {
                write!(f, "unable to retrieve the remote config template: {}", cause)
            }
            Error::WriteNotSupported => {
                write!(f, "this state repository only supports reading")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::RemoteFetch(cause) => {
                let cause: &(dyn StdError + 'static) = cause.as_ref();
                Some(cause)
            }
            _ => None,
        }
    }
}
