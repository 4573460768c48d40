//! Credential providers.
//!
//! The signer itself only consumes a [`Credential`]; these providers cover
//! the usual places one lives: literals, the process environment, and the
//! shared credentials file.

use crate::constants::{
    AWS_ACCESS_KEY_ID, AWS_PROFILE, AWS_SECRET_ACCESS_KEY, AWS_SHARED_CREDENTIALS_FILE,
};
use crate::{Credential, Error, Result};
use ini::Ini;
use log::debug;
use std::env;
use std::fmt::{self, Debug};
use std::path::PathBuf;

/// ProvideCredential is the trait resolving a credential from somewhere.
///
/// `Ok(None)` means this source has nothing to offer and the next one may be
/// tried; an error means the source exists but is unusable.
pub trait ProvideCredential: Debug {
    /// Resolve a credential, or `None` when this source has none.
    fn provide_credential(&self) -> Result<Option<Credential>>;
}

/// StaticCredentialProvider hands out a credential given at construction.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a provider wrapping literal keys.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(access_key_id, secret_access_key),
        }
    }
}

impl ProvideCredential for StaticCredentialProvider {
    fn provide_credential(&self) -> Result<Option<Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

/// EnvCredentialProvider loads credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `AWS_ACCESS_KEY_ID`: the access key ID
/// - `AWS_SECRET_ACCESS_KEY`: the secret access key
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

impl ProvideCredential for EnvCredentialProvider {
    fn provide_credential(&self) -> Result<Option<Credential>> {
        let access_key_id = env::var(AWS_ACCESS_KEY_ID).ok();
        let secret_access_key = env::var(AWS_SECRET_ACCESS_KEY).ok();

        match (access_key_id, secret_access_key) {
            (Some(ak), Some(sk)) if !ak.is_empty() && !sk.is_empty() => {
                Ok(Some(Credential::new(ak, sk)))
            }
            _ => Ok(None),
        }
    }
}

/// ProfileCredentialProvider loads credentials from the shared credentials
/// file.
///
/// The file is `~/.aws/credentials` unless `AWS_SHARED_CREDENTIALS_FILE`
/// points elsewhere. The profile to use is determined by:
///
/// 1. The name given via [`with_profile`](Self::with_profile)
/// 2. The `AWS_PROFILE` environment variable
/// 3. `default`
#[derive(Debug, Default)]
pub struct ProfileCredentialProvider {
    profile: Option<String>,
    credentials_file: Option<String>,
}

impl ProfileCredentialProvider {
    /// Create a new ProfileCredentialProvider with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the profile name to use.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the path to the credentials file.
    pub fn with_credentials_file(mut self, path: impl Into<String>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    fn credentials_path(&self) -> Option<PathBuf> {
        let path = if let Some(path) = &self.credentials_file {
            path.clone()
        } else if let Ok(path) = env::var(AWS_SHARED_CREDENTIALS_FILE) {
            path
        } else {
            "~/.aws/credentials".to_string()
        };

        if let Some(rest) = path.strip_prefix("~/") {
            match home::home_dir() {
                Some(home) => Some(home.join(rest)),
                None => {
                    debug!("failed to expand homedir for path: {path}");
                    None
                }
            }
        } else {
            Some(PathBuf::from(path))
        }
    }
}

impl ProvideCredential for ProfileCredentialProvider {
    fn provide_credential(&self) -> Result<Option<Credential>> {
        let Some(path) = self.credentials_path() else {
            return Ok(None);
        };

        if !path.exists() {
            debug!("credentials file {} not found", path.display());
            return Ok(None);
        }

        let conf = Ini::load_from_file(&path).map_err(|e| {
            Error::config_invalid(format!(
                "failed to parse credentials file {}",
                path.display()
            ))
            .with_source(anyhow::Error::new(e))
        })?;

        let profile = match &self.profile {
            Some(profile) => profile.clone(),
            None => env::var(AWS_PROFILE).unwrap_or_else(|_| "default".to_string()),
        };

        let Some(props) = conf.section(Some(profile.as_str())) else {
            debug!("profile {profile} not found in credentials file");
            return Ok(None);
        };

        let access_key_id = props.get("aws_access_key_id");
        let secret_access_key = props.get("aws_secret_access_key");

        match (access_key_id, secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential::new(ak, sk))),
            _ => Ok(None),
        }
    }
}

/// ProvideCredentialChain tries a list of providers in order and returns the
/// first credential found.
#[derive(Default)]
pub struct ProvideCredentialChain {
    providers: Vec<Box<dyn ProvideCredential>>,
}

impl ProvideCredentialChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential provider to the chain.
    pub fn push(mut self, provider: impl ProvideCredential + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl Debug for ProvideCredentialChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers_count", &self.providers.len())
            .finish()
    }
}

impl ProvideCredential for ProvideCredentialChain {
    fn provide_credential(&self) -> Result<Option<Credential>> {
        for provider in &self.providers {
            debug!("trying credential provider: {provider:?}");

            match provider.provide_credential() {
                Ok(Some(cred)) => return Ok(Some(cred)),
                Ok(None) => continue,
                Err(e) => {
                    debug!("credential provider {provider:?} failed: {e:?}");
                    continue;
                }
            }
        }

        Ok(None)
    }
}

/// DefaultCredentialProvider is the composition most callers want:
/// environment variables first, then the shared credentials file.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(ProfileCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain) -> Self {
        Self { chain }
    }
}

impl ProvideCredential for DefaultCredentialProvider {
    fn provide_credential(&self) -> Result<Option<Credential>> {
        self.chain.provide_credential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_static_provider() {
        let provider = StaticCredentialProvider::new("ak", "sk");
        let cred = provider.provide_credential().unwrap().unwrap();
        assert_eq!(cred.access_key_id, "ak");
        assert_eq!(cred.secret_access_key, "sk");
    }

    #[test]
    fn test_env_provider_without_env() {
        temp_env::with_vars_unset([AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY], || {
            let provider = EnvCredentialProvider::new();
            assert!(provider.provide_credential().unwrap().is_none());
        });
    }

    #[test]
    fn test_env_provider_with_env() {
        temp_env::with_vars(
            [
                (AWS_ACCESS_KEY_ID, Some("env_access_key")),
                (AWS_SECRET_ACCESS_KEY, Some("env_secret_key")),
            ],
            || {
                let provider = EnvCredentialProvider::new();
                let cred = provider.provide_credential().unwrap().unwrap();
                assert_eq!(cred.access_key_id, "env_access_key");
                assert_eq!(cred.secret_access_key, "env_secret_key");
            },
        );
    }

    fn write_credentials_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            "[default]\naws_access_key_id=default_ak\naws_secret_access_key=default_sk\n\n\
             [backup]\naws_access_key_id=backup_ak\naws_secret_access_key=backup_sk"
        )
        .expect("write temp file");
        file
    }

    #[test]
    fn test_profile_provider_default_profile() {
        let file = write_credentials_file();

        temp_env::with_var_unset(AWS_PROFILE, || {
            let provider = ProfileCredentialProvider::new()
                .with_credentials_file(file.path().to_str().unwrap());
            let cred = provider.provide_credential().unwrap().unwrap();
            assert_eq!(cred.access_key_id, "default_ak");
            assert_eq!(cred.secret_access_key, "default_sk");
        });
    }

    #[test]
    fn test_profile_provider_named_profile() {
        let file = write_credentials_file();

        let provider = ProfileCredentialProvider::new()
            .with_credentials_file(file.path().to_str().unwrap())
            .with_profile("backup");
        let cred = provider.provide_credential().unwrap().unwrap();
        assert_eq!(cred.access_key_id, "backup_ak");
        assert_eq!(cred.secret_access_key, "backup_sk");
    }

    #[test]
    fn test_profile_provider_profile_from_env() {
        let file = write_credentials_file();

        temp_env::with_var(AWS_PROFILE, Some("backup"), || {
            let provider = ProfileCredentialProvider::new()
                .with_credentials_file(file.path().to_str().unwrap());
            let cred = provider.provide_credential().unwrap().unwrap();
            assert_eq!(cred.access_key_id, "backup_ak");
        });
    }

    #[test]
    fn test_profile_provider_missing_file() {
        let provider =
            ProfileCredentialProvider::new().with_credentials_file("/nonexistent/credentials");
        assert!(provider.provide_credential().unwrap().is_none());
    }

    #[test]
    fn test_chain_returns_first_hit() {
        #[derive(Debug)]
        struct Empty;

        impl ProvideCredential for Empty {
            fn provide_credential(&self) -> Result<Option<Credential>> {
                Ok(None)
            }
        }

        let chain = ProvideCredentialChain::new()
            .push(Empty)
            .push(StaticCredentialProvider::new("first", "sk"))
            .push(StaticCredentialProvider::new("second", "sk"));

        let cred = chain.provide_credential().unwrap().unwrap();
        assert_eq!(cred.access_key_id, "first");
    }

    #[test]
    fn test_chain_skips_failing_provider() {
        #[derive(Debug)]
        struct Failing;

        impl ProvideCredential for Failing {
            fn provide_credential(&self) -> Result<Option<Credential>> {
                Err(Error::config_invalid("broken source"))
            }
        }

        let chain = ProvideCredentialChain::new()
            .push(Failing)
            .push(StaticCredentialProvider::new("fallback", "sk"));

        let cred = chain.provide_credential().unwrap().unwrap();
        assert_eq!(cred.access_key_id, "fallback");
    }
}
