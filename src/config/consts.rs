/// Query used when neither the config nor the command line supplies one
pub const DEFAULT_QUERY: &str = "query";
/// Producer-side deadline applied when `timeout_ms` is omitted (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 500;
