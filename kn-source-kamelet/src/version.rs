use serde::Serialize;
use std::fmt;

/// Build metadata of the plugin binary, stamped by the build script.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: &'static str,
    pub build_date: &'static str,
    pub git_revision: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        VersionInfo {
            version: env!("CARGO_PKG_VERSION"),
            build_date: option_env!("KN_SOURCE_KAMELET_BUILD_DATE").unwrap_or("unknown"),
            git_revision: option_env!("KN_SOURCE_KAMELET_GIT_REVISION").unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version:      {}", self.version)?;
        writeln!(f, "Build Date:   {}", self.build_date)?;
        writeln!(f, "Git Revision: {}", self.git_revision)
    }
}
