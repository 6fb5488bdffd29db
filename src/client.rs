use crate::error::ClientError;
use crate::template::Template;

/// RemoteConfigClient is the boundary to the hosted configuration provider.
///
/// Implementations own transport, authentication and any deadlines; the
/// repository only ever asks for the current template. The handle given to a
/// repository must already be initialized, and every failure mode of the
/// underlying call (network, auth, interruption) surfaces through the single
/// error channel of [RemoteConfigClient::fetch_template].
pub trait RemoteConfigClient: Send + Sync {
    /// Retrieve the provider's current template.
    fn fetch_template(&self) -> Result<Template, ClientError>;
}
