// =============================================================================
// Application Identity
// =============================================================================

/// Application name (binary, paths and identifiers)
pub const APP_NAME_LOWER: &str = "grid-filters";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".grid-filters";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "grid-filters.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "GRID_FILTERS_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "GRID_FILTERS_LOG";

/// Environment variable for log output format (compact or json)
pub const ENV_LOG_FORMAT: &str = "GRID_FILTERS_LOG_FORMAT";

/// Default log filter. Warnings only, stdout carries the translated output.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// =============================================================================
// Environment Variables - Output
// =============================================================================

/// Environment variable to pretty-print JSON output
pub const ENV_PRETTY: &str = "GRID_FILTERS_PRETTY";

/// Environment variable to wrap output in the search envelope
pub const ENV_ENVELOPE: &str = "GRID_FILTERS_ENVELOPE";

// =============================================================================
// Input Limits
// =============================================================================

/// Environment variable for the maximum accepted input size
pub const ENV_MAX_INPUT_BYTES: &str = "GRID_FILTERS_MAX_INPUT_BYTES";

/// Maximum size of filter state JSON in bytes (64KB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit code when the filter state was rejected (error body on stdout)
pub const EXIT_FILTER_REJECTED: u8 = 2;
