//! Host platform detection.
//!
//! The controller asks an oracle once during setup whether it runs on a touch
//! (mobile) host or a desktop host, and never again.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable forcing the detected platform (`mobile` or `desktop`).
pub const PLATFORM_ENV: &str = "VKEYBOARD_PLATFORM";

/// Input path selected at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// On-screen keys, buffered dispatch
    Mobile,
    /// Physical keyboard and mouse polling
    Desktop,
}

impl Platform {
    pub fn is_mobile(self) -> bool {
        self == Platform::Mobile
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Mobile => f.write_str("mobile"),
            Platform::Desktop => f.write_str("desktop"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(Platform::Mobile),
            "desktop" => Ok(Platform::Desktop),
            other => Err(format!("unknown platform '{other}' (expected mobile or desktop)")),
        }
    }
}

/// One-shot platform query.
pub trait PlatformOracle {
    fn detect(&self) -> Platform;
}

/// Oracle that always answers the same platform.
#[derive(Debug, Clone, Copy)]
pub struct FixedPlatform(pub Platform);

impl PlatformOracle for FixedPlatform {
    fn detect(&self) -> Platform {
        self.0
    }
}

/// Oracle for the running host.
///
/// Android and iOS builds are mobile, everything else is desktop, unless
/// [`PLATFORM_ENV`] names a platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl PlatformOracle for HostPlatform {
    fn detect(&self) -> Platform {
        if let Some(forced) = env_override() {
            log::debug!("Platform forced to {forced} via {PLATFORM_ENV}");
            return forced;
        }

        if cfg!(any(target_os = "android", target_os = "ios")) {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }
}

fn env_override() -> Option<Platform> {
    let value = env::var(PLATFORM_ENV).ok()?;
    match value.parse() {
        Ok(platform) => Some(platform),
        Err(err) => {
            log::warn!("Ignoring {PLATFORM_ENV}: {err}");
            None
        }
    }
}
