/// Log target used for every forwarded driver message.
pub const DRIVER_TARGET: &str = "glaze_engine::driver";

/// Severity reported by the driver's debug-output extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebugSeverity {
    High,
    Medium,
    Low,
    Notification,
}

impl DebugSeverity {
    pub fn level(self) -> log::Level {
        match self {
            Self::High => log::Level::Error,
            Self::Medium => log::Level::Warn,
            Self::Low => log::Level::Info,
            Self::Notification => log::Level::Debug,
        }
    }
}

/// Forwards one driver debug message to the `log` facade.
///
/// Driver-detected errors (bad enums, size mismatches) surface only here; the
/// resource layer never polls the error state itself.
pub fn forward_driver_message(source: u32, kind: u32, id: u32, severity: DebugSeverity, message: &str) {
    log::log!(
        target: DRIVER_TARGET,
        severity.level(),
        "[source={source:#x} type={kind:#x} id={id}] {}",
        message.trim_end()
    );
}
