pub const PROGRAM_NAME: &str = "mirrorset";
pub const PROGRAM_LOG_LEVEL: &str = "MIRRORSET_LOG_LEVEL";

/// Maximum difference, in seconds, between two exact dates that still
/// counts as "the same" when comparing entries.
pub const DEFAULT_TIME_PRECISION_SECS: u64 = 0;

/// Window used when either side only knows a coarse date, as produced by
/// listings that print minutes but not seconds.
pub const DEFAULT_LOOSE_TIME_PRECISION_SECS: u64 = 60;

/// Permission bits stripped before applying stored modes to local files.
pub const DEFAULT_CHMOD_MASK: u32 = 0o022;
