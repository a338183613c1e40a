//! Constants for the settings-gh client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// Git host behind the public API, used for clone URLs
pub const GIT_HOST: &str = "github.com";

/// Username GitHub accepts alongside a token in HTTPS git URLs
pub const GIT_TOKEN_USER: &str = "x-access-token";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("github-settings/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github+json";

/// Page size requested from list endpoints (the API maximum)
pub const PER_PAGE: usize = 100;
