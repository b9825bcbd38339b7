//! Target platform value object - which runtime a bundle is packaged for

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform a bundle is built for
///
/// CI runners are typically Linux, hence the default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TargetPlatform {
    #[default]
    StandaloneLinux64,
    StandaloneWindows64,
    StandaloneOsx,
    Android,
    Ios,
    #[serde(alias = "webgl")]
    WebGl,
}

impl TargetPlatform {
    pub const ALL: [TargetPlatform; 6] = [
        TargetPlatform::StandaloneLinux64,
        TargetPlatform::StandaloneWindows64,
        TargetPlatform::StandaloneOsx,
        TargetPlatform::Android,
        TargetPlatform::Ios,
        TargetPlatform::WebGl,
    ];

    /// Identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::StandaloneLinux64 => "standalone-linux64",
            TargetPlatform::StandaloneWindows64 => "standalone-windows64",
            TargetPlatform::StandaloneOsx => "standalone-osx",
            TargetPlatform::Android => "android",
            TargetPlatform::Ios => "ios",
            TargetPlatform::WebGl => "web-gl",
        }
    }

    /// One-byte tag written into bundle headers
    pub fn tag(&self) -> u8 {
        match self {
            TargetPlatform::StandaloneLinux64 => 1,
            TargetPlatform::StandaloneWindows64 => 2,
            TargetPlatform::StandaloneOsx => 3,
            TargetPlatform::Android => 4,
            TargetPlatform::Ios => 5,
            TargetPlatform::WebGl => 6,
        }
    }
}

impl std::fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Separators are ignored: `StandaloneLinux64`, `standalone_linux64`
        // and `standalone-linux64` are the same platform
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "standalonelinux64" | "linux64" | "linux" => Ok(TargetPlatform::StandaloneLinux64),
            "standalonewindows64" | "windows64" | "windows" => {
                Ok(TargetPlatform::StandaloneWindows64)
            }
            "standaloneosx" | "osx" | "macos" => Ok(TargetPlatform::StandaloneOsx),
            "android" => Ok(TargetPlatform::Android),
            "ios" => Ok(TargetPlatform::Ios),
            "webgl" => Ok(TargetPlatform::WebGl),
            _ => Err(format!("unknown target platform '{}'", s)),
        }
    }
}
