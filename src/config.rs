/// Configuration constants for the Terraform API
pub mod api {
    /// Base path for API v2
    pub const BASE_PATH: &str = "/api/v2";

    /// JSON:API media type sent as Content-Type
    pub const MEDIA_TYPE: &str = "application/vnd.api+json";

    /// Largest page size the API accepts
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Upper bound on pages fetched by a single `list_all`
    pub const MAX_PAGES: u32 = 1000;

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Workspaces endpoint
    pub const WORKSPACES: &str = "workspaces";

    /// Runs endpoint
    pub const RUNS: &str = "runs";

    /// Teams endpoint
    pub const TEAMS: &str = "teams";

    /// Projects endpoint
    pub const PROJECTS: &str = "projects";
}

/// Environment variable names consulted when an argument is absent
pub mod env {
    /// API hostname
    pub const HOSTNAME: &str = "TFE_HOSTNAME";

    /// API token
    pub const TOKEN: &str = "TFE_TOKEN";

    /// Default organization
    pub const ORG: &str = "TFE_ORG";

    /// Full API base URL, overriding the hostname
    pub const BASE_URL: &str = "TFE_BASE_URL";
}

/// Default values
pub mod defaults {
    /// Default API host
    pub const HOSTNAME: &str = "app.terraform.io";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// TCP connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}
