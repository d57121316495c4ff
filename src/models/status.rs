//! Lifecycle states shared by projects and iterations.

use serde::{Deserialize, Serialize};

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum $name {
            /// The server sent a state this client does not know.
            #[default]
            Unknown,
            /// Open for translation.
            Active,
            /// Visible but no longer editable.
            ReadOnly,
            /// Retired.
            Obsolete,
        }

        impl $name {
            /// Match a server status string case-insensitively.
            ///
            /// Unrecognized values map to `Unknown` instead of failing.
            pub fn from_nick(nick: &str) -> Self {
                match nick.to_ascii_lowercase().as_str() {
                    "active" => Self::Active,
                    "readonly" => Self::ReadOnly,
                    "obsolete" => Self::Obsolete,
                    _ => Self::Unknown,
                }
            }

            /// The status as the server spells it.
            pub fn as_str(&self) -> &'static str {
                match self {
                    Self::Unknown => "UNKNOWN",
                    Self::Active => "ACTIVE",
                    Self::ReadOnly => "READONLY",
                    Self::Obsolete => "OBSOLETE",
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum!(
    /// Status of a [`Project`](crate::Project).
    ProjectStatus
);

status_enum!(
    /// Status of an [`Iteration`](crate::Iteration).
    IterationStatus
);
