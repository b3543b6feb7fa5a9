//! Attachment points and wearable slots on the avatar body.
//!
//! Attachment points are rigid locations for attached objects; wearable
//! slots are the layered clothing/body-part channels. Both parse from the
//! case-insensitive names used in protocol command options.

use serde::{Deserialize, Serialize};

/// A named location on the avatar body where an item can be worn as a
/// rigid attachment.
///
/// `Default` means "no specific point": the host viewer picks the item's
/// last-used or default point when the attach request is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentPoint {
    Default,
    Chest,
    Skull,
    LeftShoulder,
    RightShoulder,
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
    Spine,
    Pelvis,
    Mouth,
    Chin,
    LeftEar,
    RightEar,
    LeftEye,
    RightEye,
    Nose,
    RightUpperArm,
    RightLowerArm,
    LeftUpperArm,
    LeftLowerArm,
    RightHip,
    RightUpperLeg,
    RightLowerLeg,
    LeftHip,
    LeftUpperLeg,
    LeftLowerLeg,
    Stomach,
    LeftPec,
    RightPec,
}

impl AttachmentPoint {
    /// Protocol name of the point, as it appears in command options.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Chest => "chest",
            Self::Skull => "skull",
            Self::LeftShoulder => "left shoulder",
            Self::RightShoulder => "right shoulder",
            Self::LeftHand => "left hand",
            Self::RightHand => "right hand",
            Self::LeftFoot => "left foot",
            Self::RightFoot => "right foot",
            Self::Spine => "spine",
            Self::Pelvis => "pelvis",
            Self::Mouth => "mouth",
            Self::Chin => "chin",
            Self::LeftEar => "left ear",
            Self::RightEar => "right ear",
            Self::LeftEye => "left eye",
            Self::RightEye => "right eye",
            Self::Nose => "nose",
            Self::RightUpperArm => "r upper arm",
            Self::RightLowerArm => "r forearm",
            Self::LeftUpperArm => "l upper arm",
            Self::LeftLowerArm => "l forearm",
            Self::RightHip => "right hip",
            Self::RightUpperLeg => "r upper leg",
            Self::RightLowerLeg => "r lower leg",
            Self::LeftHip => "left hip",
            Self::LeftUpperLeg => "l upper leg",
            Self::LeftLowerLeg => "l lower leg",
            Self::Stomach => "stomach",
            Self::LeftPec => "left pec",
            Self::RightPec => "right pec",
        }
    }

    /// Parse a point from its case-insensitive protocol name.
    ///
    /// Returns `None` for unrecognized names, including "default": the
    /// protocol never addresses the default point by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let point = match name.as_str() {
            "chest" => Self::Chest,
            "skull" => Self::Skull,
            "left shoulder" => Self::LeftShoulder,
            "right shoulder" => Self::RightShoulder,
            "left hand" => Self::LeftHand,
            "right hand" => Self::RightHand,
            "left foot" => Self::LeftFoot,
            "right foot" => Self::RightFoot,
            "spine" => Self::Spine,
            "pelvis" => Self::Pelvis,
            "mouth" => Self::Mouth,
            "chin" => Self::Chin,
            "left ear" => Self::LeftEar,
            "right ear" => Self::RightEar,
            "left eye" => Self::LeftEye,
            "right eye" => Self::RightEye,
            "nose" => Self::Nose,
            "r upper arm" => Self::RightUpperArm,
            "r forearm" => Self::RightLowerArm,
            "l upper arm" => Self::LeftUpperArm,
            "l forearm" => Self::LeftLowerArm,
            "right hip" => Self::RightHip,
            "r upper leg" => Self::RightUpperLeg,
            "r lower leg" => Self::RightLowerLeg,
            "left hip" => Self::LeftHip,
            "l upper leg" => Self::LeftUpperLeg,
            "l lower leg" => Self::LeftLowerLeg,
            "stomach" => Self::Stomach,
            "left pec" => Self::LeftPec,
            "right pec" => Self::RightPec,
            _ => return None,
        };
        Some(point)
    }
}

impl std::fmt::Display for AttachmentPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named layer for non-rigid clothing and body-part items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WearableSlot {
    Shape,
    Skin,
    Hair,
    Eyes,
    Shirt,
    Pants,
    Shoes,
    Socks,
    Jacket,
    Gloves,
    Undershirt,
    Underpants,
    Skirt,
    Alpha,
    Tattoo,
    Physics,
}

impl WearableSlot {
    /// Protocol name of the slot, as it appears in command options.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Skin => "skin",
            Self::Hair => "hair",
            Self::Eyes => "eyes",
            Self::Shirt => "shirt",
            Self::Pants => "pants",
            Self::Shoes => "shoes",
            Self::Socks => "socks",
            Self::Jacket => "jacket",
            Self::Gloves => "gloves",
            Self::Undershirt => "undershirt",
            Self::Underpants => "underpants",
            Self::Skirt => "skirt",
            Self::Alpha => "alpha",
            Self::Tattoo => "tattoo",
            Self::Physics => "physics",
        }
    }

    /// Parse a slot from its case-insensitive protocol name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let slot = match name.as_str() {
            "shape" => Self::Shape,
            "skin" => Self::Skin,
            "hair" => Self::Hair,
            "eyes" => Self::Eyes,
            "shirt" => Self::Shirt,
            "pants" => Self::Pants,
            "shoes" => Self::Shoes,
            "socks" => Self::Socks,
            "jacket" => Self::Jacket,
            "gloves" => Self::Gloves,
            "undershirt" => Self::Undershirt,
            "underpants" => Self::Underpants,
            "skirt" => Self::Skirt,
            "alpha" => Self::Alpha,
            "tattoo" => Self::Tattoo,
            "physics" => Self::Physics,
            _ => return None,
        };
        Some(slot)
    }
}

impl std::fmt::Display for WearableSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_point_parse_is_case_insensitive() {
        assert_eq!(AttachmentPoint::from_name("Chin"), Some(AttachmentPoint::Chin));
        assert_eq!(AttachmentPoint::from_name("SPINE"), Some(AttachmentPoint::Spine));
        assert_eq!(
            AttachmentPoint::from_name("  left shoulder "),
            Some(AttachmentPoint::LeftShoulder)
        );
    }

    #[test]
    fn default_point_has_no_protocol_name() {
        assert_eq!(AttachmentPoint::from_name("default"), None);
    }

    #[test]
    fn unknown_names_do_not_parse() {
        assert_eq!(AttachmentPoint::from_name("tail"), None);
        assert_eq!(WearableSlot::from_name("cape"), None);
    }

    #[test]
    fn wearable_names_roundtrip() {
        for slot in [WearableSlot::Shirt, WearableSlot::Pants, WearableSlot::Tattoo] {
            assert_eq!(WearableSlot::from_name(slot.name()), Some(slot));
        }
    }
}
