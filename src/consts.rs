pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains the configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // NOTIFICATION CONFIGURATION
    // =============================================================================

    /// How long a notification stays visible unless dismissed (milliseconds).
    pub const NOTIFICATION_DISPLAY_MS: u64 = 5_000;

    /// Maximum number of notifications drawn at once; older ones stay queued.
    pub const MAX_VISIBLE_TOASTS: usize = 4;

    // =============================================================================
    // UI LOOP CONFIGURATION
    // =============================================================================

    /// Input poll interval, also the resolution of notification expiry (milliseconds).
    pub const UI_TICK_MS: u64 = 100;

    /// Splash screen duration before the dashboard is shown (milliseconds).
    pub const SPLASH_DURATION_MS: u64 = 1_500;

    /// Capacity of the channel carrying provider completions back to the UI loop.
    pub const COMPLETION_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // EXPORT CONFIGURATION
    // =============================================================================

    pub mod export {
        /// File name handed to the rendering surface for downloads.
        pub const EXPORT_FILENAME: &str = "ipdr_search_results.csv";

        /// Header row of the CSV export.
        pub const CSV_HEADER: [&str; 7] = [
            "Record ID",
            "A-Party",
            "B-Party",
            "App Type",
            "Timestamp",
            "Duration",
            "Location",
        ];
    }

    // =============================================================================
    // SEARCH CONFIGURATION
    // =============================================================================

    pub mod search {
        /// Application types offered as filter chips on the search tab.
        pub const FILTER_APP_TYPES: [&str; 8] = [
            "WhatsApp",
            "Facebook",
            "HTTPS/Skype",
            "SSH",
            "FTP",
            "HTTP",
            "SMTP",
            "IMAPS",
        ];
    }

    // =============================================================================
    // NETWORK VIEW CONFIGURATION
    // =============================================================================

    pub mod network {
        /// Timeline window restored by "reset view" (days).
        pub const DEFAULT_TIMELINE_DAYS: u16 = 30;
        /// Widest selectable timeline window (days).
        pub const MAX_TIMELINE_DAYS: u16 = 90;
        /// Zoom is clamped to `-MAX_ZOOM..=MAX_ZOOM`.
        pub const MAX_ZOOM: i8 = 5;
        /// Timeline slider step for the arrow keys (days).
        pub const TIMELINE_STEP_DAYS: u16 = 5;
    }

    // =============================================================================
    // CONFIGURATION FILES
    // =============================================================================

    /// Directory under `$HOME` holding config and logs.
    pub const CONFIG_DIR_NAME: &str = ".ipdr-dashboard";
    pub const CONFIG_FILE_NAME: &str = "config.json";
    pub const LOG_DIR_NAME: &str = "logs";
}
