/// Initialization parameters for the GL driver.
///
/// Keep this structure small. Add flags only when a concrete platform or
/// driver requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Route driver debug messages into the `log` facade.
    ///
    /// Only takes effect when the context supports debug output.
    pub debug_output: bool,

    /// Deliver debug messages on the thread and call that caused them.
    ///
    /// Slower, but makes the log line appear right after the offending call.
    pub synchronous_debug: bool,

    /// Minimum (major, minor) context version accepted.
    pub min_version: (u32, u32),
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            debug_output: cfg!(debug_assertions),
            synchronous_debug: true,
            min_version: (3, 3),
        }
    }
}
