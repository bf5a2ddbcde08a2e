pub mod codes {
    /// The biggest local code must be smaller than this value
    pub const DEFAULT_CODE_MULTIPLIER: i64 = 100_000;

    /// Relative maximum for any global code
    /// The component code maximum is derived from it so that the biggest local code
    /// combined with the biggest component code stays representable.
    pub const GLOBAL_CODE_MAX_RELATIVE: i64 = i64::MAX;

    /// Local code sampled from two components for a shared global code range
    pub const COLLISION_SAMPLE_LOCAL_CODE: i64 = 1;
}

pub mod l10n {
    /// Locale used for composing the frozen system message
    pub const SYSTEM_LOCALE: &str = "en";

    /// Text shown to end users in place of a hidden message, followed by the code
    pub const FE_STUB_TEXT: &str = "error";
}

pub mod report {
    /// First-level report key for components participating in the global scheme
    pub const GLOBAL_KEY: &str = "__global";

    /// First-level report key holding collected validation errors
    pub const ERRORS_KEY: &str = "__errors";

    /// Maximum validation errors kept in a single report
    /// RESOURCE: Prevents unbounded error accumulation on broken catalogs
    pub const MAX_COLLECTED_ERRORS: usize = 10_000;
}

pub mod logging {
    /// Log buffer size for the memory logger
    pub const LOG_BUFFER_SIZE: usize = 10_000;

    /// Maximum log message length
    pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;
}
