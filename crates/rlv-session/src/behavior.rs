//! Recognized behavior names in the command grammar.

use serde::{Deserialize, Serialize};

/// A recognized behavior in the command grammar.
///
/// Unrecognized names never reach this type: the dispatcher skips them
/// after parsing. Boolean locks double as restriction names in the store;
/// the attach/detach families and the reply queries are force/query
/// commands only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    // Boolean locks.
    TpLoc,
    TpLm,
    TpLure,
    Unsit,
    Fly,
    SitTp,
    SendChat,
    RecvChat,
    SendIm,
    RecvIm,
    Edit,
    Rez,
    Detach,
    // Store maintenance.
    Clear,
    // Reply queries.
    Version,
    GetStatus,
    // Attach family: non-recursive, recursive, and worn-criterion forms.
    Attach,
    AttachOver,
    AttachOverOrReplace,
    AttachAll,
    AttachAllOver,
    AttachAllOverOrReplace,
    AttachAllThis,
    AttachAllThisOver,
    AttachAllThisOverOrReplace,
    // Detach family.
    DetachAll,
    DetachMe,
}

/// How an attach-family command resolves its target folders and the
/// default replace policy for planned requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachSpec {
    /// Descend through all (non-hidden) descendant folders.
    pub recursive: bool,
    /// Resolve target folders from a worn-item criterion instead of a path.
    pub this: bool,
    /// Default replace policy; a plain name replaces, an `over` suffix
    /// adds to, and `overorreplace` replaces again.
    pub replace: bool,
}

impl Behavior {
    /// Parse a behavior from its case-insensitive protocol name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let behavior = match name.as_str() {
            "tploc" => Self::TpLoc,
            "tplm" => Self::TpLm,
            "tplure" => Self::TpLure,
            "unsit" => Self::Unsit,
            "fly" => Self::Fly,
            "sittp" => Self::SitTp,
            "sendchat" => Self::SendChat,
            "recvchat" => Self::RecvChat,
            "sendim" => Self::SendIm,
            "recvim" => Self::RecvIm,
            "edit" => Self::Edit,
            "rez" => Self::Rez,
            "detach" => Self::Detach,
            "clear" => Self::Clear,
            "version" => Self::Version,
            "getstatus" => Self::GetStatus,
            "attach" => Self::Attach,
            "attachover" => Self::AttachOver,
            "attachoverorreplace" => Self::AttachOverOrReplace,
            "attachall" => Self::AttachAll,
            "attachallover" => Self::AttachAllOver,
            "attachalloverorreplace" => Self::AttachAllOverOrReplace,
            "attachallthis" => Self::AttachAllThis,
            "attachallthisover" => Self::AttachAllThisOver,
            "attachallthisoverorreplace" => Self::AttachAllThisOverOrReplace,
            "detachall" => Self::DetachAll,
            "detachme" => Self::DetachMe,
            _ => return None,
        };
        Some(behavior)
    }

    /// Canonical protocol name, as stored in restriction records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TpLoc => "tploc",
            Self::TpLm => "tplm",
            Self::TpLure => "tplure",
            Self::Unsit => "unsit",
            Self::Fly => "fly",
            Self::SitTp => "sittp",
            Self::SendChat => "sendchat",
            Self::RecvChat => "recvchat",
            Self::SendIm => "sendim",
            Self::RecvIm => "recvim",
            Self::Edit => "edit",
            Self::Rez => "rez",
            Self::Detach => "detach",
            Self::Clear => "clear",
            Self::Version => "version",
            Self::GetStatus => "getstatus",
            Self::Attach => "attach",
            Self::AttachOver => "attachover",
            Self::AttachOverOrReplace => "attachoverorreplace",
            Self::AttachAll => "attachall",
            Self::AttachAllOver => "attachallover",
            Self::AttachAllOverOrReplace => "attachalloverorreplace",
            Self::AttachAllThis => "attachallthis",
            Self::AttachAllThisOver => "attachallthisover",
            Self::AttachAllThisOverOrReplace => "attachallthisoverorreplace",
            Self::DetachAll => "detachall",
            Self::DetachMe => "detachme",
        }
    }

    /// Whether this behavior is a boolean lock, togglable with `=n`/`=y`.
    pub fn is_boolean_lock(&self) -> bool {
        matches!(
            self,
            Self::TpLoc
                | Self::TpLm
                | Self::TpLure
                | Self::Unsit
                | Self::Fly
                | Self::SitTp
                | Self::SendChat
                | Self::RecvChat
                | Self::SendIm
                | Self::RecvIm
                | Self::Edit
                | Self::Rez
                | Self::Detach
        )
    }

    /// Attach-family classification, `None` for everything else.
    pub fn attach_spec(&self) -> Option<AttachSpec> {
        let spec = match self {
            Self::Attach => AttachSpec { recursive: false, this: false, replace: true },
            Self::AttachOver => AttachSpec { recursive: false, this: false, replace: false },
            Self::AttachOverOrReplace => AttachSpec { recursive: false, this: false, replace: true },
            Self::AttachAll => AttachSpec { recursive: true, this: false, replace: true },
            Self::AttachAllOver => AttachSpec { recursive: true, this: false, replace: false },
            Self::AttachAllOverOrReplace => AttachSpec { recursive: true, this: false, replace: true },
            Self::AttachAllThis => AttachSpec { recursive: true, this: true, replace: true },
            Self::AttachAllThisOver => AttachSpec { recursive: true, this: true, replace: false },
            Self::AttachAllThisOverOrReplace => AttachSpec { recursive: true, this: true, replace: true },
            _ => return None,
        };
        Some(spec)
    }
}
