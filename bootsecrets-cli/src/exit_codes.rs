/// Exit codes for boot scripts and CI.
pub const SUCCESS: i32 = 0;
pub const INVALID_CONFIG: i32 = 2;
pub const RESOLUTION_FAILED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;
