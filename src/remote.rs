use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::cache::CachingStateRepository;
use crate::client::RemoteConfigClient;
use crate::error::Error;
use crate::resolve::resolve;
use crate::store::{FlagState, StateRepository};

/// State repository that resolves every lookup directly against the remote
/// template.
///
/// Each lookup performs one template fetch through the injected client, the
/// only network interaction in this crate. Most deployments should not call
/// this on every flag check; construct through [RemoteStateRepository::builder]
/// to get the caching wrapper the provider's throttling limits call for.
pub struct RemoteStateRepository {
    client: Arc<dyn RemoteConfigClient>,
}

impl RemoteStateRepository {
    /// Creates an uncached repository reading through `client`.
    pub fn new(client: Arc<dyn RemoteConfigClient>) -> Self {
        RemoteStateRepository { client }
    }

    /// Starts a builder for a cached repository.
    pub fn builder() -> Builder {
        Builder::new()
    }
}

impl StateRepository for RemoteStateRepository {
    fn feature_state(&self, name: &str) -> Result<Option<FlagState>, Error> {
        let template = self.client.fetch_template().map_err(Error::RemoteFetch)?;
        if let Some(version) = template
            .version
            .as_ref()
            .and_then(|v| v.version_number.as_deref())
        {
            debug!("fetched remote config template version {}", version);
        }

        // Parameter names are matched exactly, including case.
        Ok(template
            .parameter(name)
            .map(|parameter| FlagState::new(name, resolve(parameter))))
    }

    fn set_feature_state(&self, _state: FlagState) -> Result<(), Error> {
        Err(Error::WriteNotSupported)
    }
}

/// Builder for a remote-config state repository.
///
/// The built repository is always wrapped in a [CachingStateRepository]:
/// with [Builder::expiry] cached values are refreshed once they exceed the
/// given age, without it the first fetched value is kept for the process
/// lifetime.
#[derive(Default)]
pub struct Builder {
    client: Option<Arc<dyn RemoteConfigClient>>,
    expiry: Option<Duration>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            client: None,
            expiry: None,
        }
    }

    /// Sets the already-initialized provider client handle. Required.
    pub fn client(mut self, client: Arc<dyn RemoteConfigClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Caps the age of cached values at `expiry`, which must lie above
    /// [crate::MIN_CACHE_EXPIRY].
    pub fn expiry(mut self, expiry: Duration) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Builds the repository.
    ///
    /// Fails with [Error::Configuration] when no client handle was set or
    /// when the configured expiry is at or below the provider minimum.
    pub fn build(self) -> Result<CachingStateRepository<RemoteStateRepository>, Error> {
        let client = self.client.ok_or_else(|| {
            Error::Configuration(
                "remote config client is not set, make sure the provider app is initialized"
                    .to_string(),
            )
        })?;
        let delegate = RemoteStateRepository::new(client);
        match self.expiry {
            Some(expiry) => CachingStateRepository::with_expiry(delegate, expiry),
            None => Ok(CachingStateRepository::unbounded(delegate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::sync::Arc;
    use std::time::Duration;

    use spectral::prelude::*;

    use super::*;
    use crate::test_common::TestClient;
    use crate::MIN_CACHE_EXPIRY;

    #[test]
    fn declared_flag_resolves_to_a_state() {
        let repository = RemoteStateRepository::new(Arc::new(TestClient::new()));

        let state = repository.feature_state("new_dashboard").unwrap().unwrap();
        assert_that!(state.name()).is_equal_to("new_dashboard");
        asserting!("conditional value wins over the disabled default")
            .that(&state.is_enabled())
            .is_true();

        let state = repository.feature_state("legacy_export").unwrap().unwrap();
        assert_that!(state.is_enabled()).is_false();
    }

    #[test]
    fn undeclared_flag_has_no_state() {
        let repository = RemoteStateRepository::new(Arc::new(TestClient::new()));
        let state = repository.feature_state("not_declared").unwrap();
        assert_that!(state).is_none();
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let repository = RemoteStateRepository::new(Arc::new(TestClient::new()));
        assert_that!(repository.feature_state("New_Dashboard").unwrap()).is_none();
    }

    #[test]
    fn fetch_failure_wraps_the_cause() {
        let client = Arc::new(TestClient::new());
        client.fail_fetches(true);
        let repository = RemoteStateRepository::new(client);

        let error = repository.feature_state("new_dashboard").unwrap_err();
        assert!(matches!(error, Error::RemoteFetch(_)));
        assert_that!(error.source()).is_some();
    }

    #[test]
    fn writes_are_rejected() {
        let repository = RemoteStateRepository::new(Arc::new(TestClient::new()));
        let result = repository.set_feature_state(FlagState::new("new_dashboard", true));
        assert!(matches!(result, Err(Error::WriteNotSupported)));
    }

    #[test]
    fn build_without_client_fails() {
        let result = RemoteStateRepository::builder().build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn build_rejects_expiry_at_or_below_the_floor() {
        for expiry in [
            Duration::ZERO,
            MIN_CACHE_EXPIRY - Duration::from_millis(1),
            MIN_CACHE_EXPIRY,
        ] {
            let result = RemoteStateRepository::builder()
                .client(Arc::new(TestClient::new()))
                .expiry(expiry)
                .build();
            assert!(matches!(result, Err(Error::Configuration(_))));
        }
    }

    #[test]
    fn build_accepts_expiry_above_the_floor() {
        let repository = RemoteStateRepository::builder()
            .client(Arc::new(TestClient::new()))
            .expiry(MIN_CACHE_EXPIRY + Duration::from_millis(1))
            .build()
            .unwrap();
        assert_that!(repository.feature_state("dark_mode").unwrap()).is_some();
    }

    #[test]
    fn build_without_expiry_caches_forever() {
        let client = Arc::new(TestClient::new());
        let repository = RemoteStateRepository::builder()
            .client(client.clone())
            .build()
            .unwrap();

        repository.feature_state("dark_mode").unwrap();
        repository.feature_state("dark_mode").unwrap();
        assert_that!(client.fetch_count()).is_equal_to(1);
    }
}
