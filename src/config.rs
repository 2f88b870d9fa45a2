//! Process-wide startup options.
//!
//! Some numeric backends abort when two copies of the Intel OpenMP runtime end up in
//! one process. Setting `KMP_DUPLICATE_LIB_OK=TRUE` downgrades that to a warning.
//! Nothing in this crate sets it implicitly; hosts that embed such a backend opt in
//! through [`RuntimeOptions::apply`].

use log::info;
use std::sync::Once;

/// Environment variable read by [`RuntimeOptions::from_env`].
pub const ALLOW_DUPLICATE_OPENMP_ENV: &str = "SHIFTSCORE_ALLOW_DUPLICATE_OPENMP";

const KMP_DUPLICATE_LIB_OK: &str = "KMP_DUPLICATE_LIB_OK";

static APPLY: Once = Once::new();

/// Startup options applied once per process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Tolerate duplicate OpenMP runtimes (`KMP_DUPLICATE_LIB_OK=TRUE`).
    pub allow_duplicate_openmp: bool,
}

impl RuntimeOptions {
    /// Options with every flag off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the duplicate OpenMP runtime workaround.
    pub fn with_allow_duplicate_openmp(mut self, allow: bool) -> Self {
        self.allow_duplicate_openmp = allow;
        self
    }

    /// Read options from the environment.
    ///
    /// `SHIFTSCORE_ALLOW_DUPLICATE_OPENMP` accepts `1`, `true` or `yes` (any case).
    pub fn from_env() -> Self {
        let allow = std::env::var(ALLOW_DUPLICATE_OPENMP_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self::new().with_allow_duplicate_openmp(allow)
    }

    /// Apply the options to the current process.
    ///
    /// Only the first call has an effect. Call this at startup, before other
    /// threads are spawned.
    pub fn apply(&self) {
        if !self.allow_duplicate_openmp {
            return;
        }
        APPLY.call_once(|| {
            std::env::set_var(KMP_DUPLICATE_LIB_OK, "TRUE");
            info!("Set {}=TRUE", KMP_DUPLICATE_LIB_OK);
        });
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
