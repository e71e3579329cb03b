/// Error code registry for recipe-finder
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 4000-4999: Dispatch errors (requests to the generative backend)
/// - 9000-9999: Other errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_READ_FAILED: u16 = 1003;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_INVALID_URL: u16 = 1006;

    // Dispatch errors (4000-4999)
    pub const DISPATCH_GENERIC: u16 = 4000;
    pub const DISPATCH_TRANSPORT: u16 = 4001;
    pub const DISPATCH_TIMEOUT: u16 = 4002;
    pub const DISPATCH_HTTP_STATUS: u16 = 4003;
    pub const DISPATCH_MALFORMED_RESPONSE: u16 = 4004;
    pub const DISPATCH_CLIENT_BUILD: u16 = 4005;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}

/// Get a human-readable description of an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        // Configuration errors
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Invalid TOML in configuration file",
        1003 => "Failed to read configuration file",
        1005 => "Invalid configuration value",
        1006 => "Invalid backend URL",

        // Dispatch errors
        4000 => "Generic dispatch error",
        4001 => "Transport error while contacting the backend",
        4002 => "Backend request timed out",
        4003 => "Backend returned an error status",
        4004 => "Backend response is missing the result field",
        4005 => "Failed to build the HTTP client",

        // Other errors
        9000 => "Generic error",

        _ => "Unknown error code",
    }
}
