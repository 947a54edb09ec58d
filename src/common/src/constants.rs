/// Placeholder reporting base. Integrators must override this through
/// configuration before reports reach anything real.
pub const DEFAULT_ENDPOINT: &str = "https://your-backend-url.com";
pub const DEFAULT_WAITLIST_ENDPOINT: &str = "http://localhost:8000";

pub const ERROR_REPORT_PATH: &str = "/api/mobile/error-report/";
pub const WAITLIST_PATH: &str = "/waitlist/";

pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

pub const RUN_MODE_ENV_VAR: &str = "BEACON_ENV";
pub const DEVELOPMENT_RUN_MODE: &str = "development";
