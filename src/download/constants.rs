//! Constants for the download module (timeouts, delays).

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for the optional read timeout (1 hour).
pub const MAX_READ_TIMEOUT_SECS: u64 = 3600;

/// Lower bound of the randomized pause between requests.
pub const RANDOM_DELAY_MIN: Duration = Duration::from_secs(1);

/// Upper bound of the randomized pause between requests.
pub const RANDOM_DELAY_MAX: Duration = Duration::from_secs(3);

/// Extension used when the content type is missing or unrecognized.
pub const DEFAULT_IMAGE_EXTENSION: &str = ".jpg";
