pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! Storage keys, endpoint defaults and the placeholder values used when a
    //! secondary fetch does not produce a value.

    // =============================================================================
    // BACKEND
    // =============================================================================

    /// Base URL used when neither the CLI, the environment nor the config file name one.
    pub const DEFAULT_API_URL: &str = "http://localhost:8080";

    /// Environment variable that overrides the configured API URL.
    pub const API_URL_ENV: &str = "NANNY_API_URL";

    // =============================================================================
    // LOCAL FILES
    // =============================================================================

    /// Directory under the user's home holding config and session storage.
    pub const APP_DIR: &str = ".nanny";

    /// File name of the persisted configuration.
    pub const CONFIG_FILE: &str = "config.json";

    /// File name of the key/value session storage.
    pub const STORAGE_FILE: &str = "storage.json";

    /// Storage keys shared with the web dashboards' local storage layout.
    pub mod storage_keys {
        /// Canonical session blob: `{ token, user: { id, role, email, full_name } }`.
        pub const AUTH: &str = "auth";
        /// Legacy raw token.
        pub const LEGACY_TOKEN: &str = "token";
        /// Legacy serialized user object.
        pub const LEGACY_USER: &str = "user";
    }

    // =============================================================================
    // VIEW DEFAULTS
    // =============================================================================

    /// Placeholder for optional text whose source fetch failed or was skipped.
    pub const PLACEHOLDER: &str = "-";

    /// Number of rows shown in "recent" overview tables.
    pub const RECENT_LIMIT: usize = 5;

    /// Number of reviews shown on the sitter detail card.
    pub const DETAIL_REVIEW_LIMIT: usize = 3;

    /// Highest star rating the backend accepts.
    pub const MAX_RATING: u8 = 5;

    /// Message shown once when the backend reports the session token expired.
    pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
}
