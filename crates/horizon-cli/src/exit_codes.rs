//! Exit codes for the horizon CLI. Part of the public contract: scripts use
//! them to tell "some masters may still be running" apart from "the restart
//! was never announced".

/// Run completed. Individual signal failures are reported but still exit 0.
pub const EXIT_SUCCESS: i32 = 0;
/// Nothing to terminate and `--fail` was given.
pub const EXIT_NOTHING_TO_TERMINATE: i32 = 1;
/// Restart marker not published (store unavailable) or bad configuration.
pub const EXIT_FATAL: i32 = 2;
/// Registry unreadable; the restart marker was still published.
pub const EXIT_REGISTRY_UNREADABLE: i32 = 3;
