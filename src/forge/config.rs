//! Configuration for the upstream forge connection.
use secrecy::SecretString;

/// Default GitHub host.
pub const DEFAULT_HOST: &str = "github.com";
/// Page size used for paginated listings.
pub const DEFAULT_PAGE_SIZE: u8 = 100;
/// Timeline event marking a pull request as merged.
pub const MERGED_EVENT: &str = "merged";

/// Remote repository connection configuration for authenticating and
/// interacting with the upstream forge.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Upstream repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl RemoteConfig {
    /// Base URI of the REST API for this host.
    pub fn api_base_uri(&self) -> String {
        if self.host == DEFAULT_HOST {
            format!("{}://api.{}", self.scheme, self.host)
        } else {
            format!("{}://{}/api/v3", self.scheme, self.host)
        }
    }

    /// HTTPS clone URL of `owner`'s copy of the repository.
    pub fn clone_url(&self, owner: &str) -> String {
        format!("{}://{}/{}/{}", self.scheme, self.host, owner, self.repo)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            scheme: "https".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}
