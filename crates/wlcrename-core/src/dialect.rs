// ── Controller command dialects ──
//
// The two supported controller families differ only in the rename syntax
// and in how output paging is switched off. `show ap summary` is shared.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

const LIST_ACCESS_POINTS: &str = "show ap summary";

/// Controller command syntax.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Dialect {
    /// Catalyst 9800 (IOS XE). Privileged prompt ends in `#`.
    IosXe,
    /// AireOS (5520, 8540, ...). Prompt ends in `>`.
    AireOs,
}

impl Dialect {
    /// Guess the dialect from the exec prompt captured at login.
    ///
    /// `#` wins over `>` when both appear.
    pub fn from_prompt(prompt: &str) -> Option<Self> {
        if prompt.contains('#') {
            Some(Self::IosXe)
        } else if prompt.contains('>') {
            Some(Self::AireOs)
        } else {
            None
        }
    }

    /// Rename command for one access point.
    ///
    /// IOS XE takes the new name after the current one; AireOS takes it
    /// right after the keyword, followed by the current name.
    pub fn rename_command(self, current_name: &str, new_name: &str) -> String {
        match self {
            Self::IosXe => format!("ap name {current_name} name {new_name}"),
            Self::AireOs => format!("config ap name {new_name} {current_name}"),
        }
    }

    pub fn list_command(self) -> &'static str {
        LIST_ACCESS_POINTS
    }

    pub fn paging_command(self) -> &'static str {
        match self {
            Self::IosXe => "terminal length 0",
            Self::AireOs => "config paging disable",
        }
    }
}
