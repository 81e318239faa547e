//! Document keys and group names shared by every peer on the wire.

// provenance
pub const PACKED_SCENE: &str = "PackedScene";
pub const PACKED_SCENE_CHILD: &str = "PackedSceneChild";
pub const FILE_PATH: &str = "FilePath";

// identity and kind
pub const NAME: &str = "Name";
pub const NODE: &str = "Node";
pub const TYPE: &str = "Type";
pub const DERIVED_TYPE: &str = "DT";
pub const DATA: &str = "Data";

// structure
pub const CHILDREN: &str = "Children";
pub const PARENT: &str = "Parent";
pub const NODES: &str = "Nodes";

// transform
pub const VISIBLE: &str = "Visible";
pub const POSITION: &str = "Pos";
pub const ROTATION: &str = "Rot";
pub const SCALE: &str = "Scale";
pub const Z_INDEX: &str = "ZI";
pub const Z_IS_RELATIVE: &str = "ZIR";
pub const Y_SORT_ENABLED: &str = "YSE";
pub const VISIBILITY_LAYER: &str = "VisibilityLayer";

// collision
pub const COLLISION_LAYER: &str = "CL";
pub const COLLISION_MASK: &str = "CM";

// shape
pub const SHAPE: &str = "SHP";
pub const RADIUS: &str = "Rad";
pub const HEIGHT: &str = "HGHT";
pub const SIZE: &str = "SZ";

pub const GROUP: &str = "Group";

/// Nodes in this group, and everything below them, are never replicated
pub const NETWORK_IGNORE_GROUP: &str = "NetworkIgnoreGroup";
/// Nodes in this group replicate, their children do not
pub const NETWORK_IGNORE_CHILDREN_GROUP: &str = "NetworkIgnoreChildrenGroup";
/// Group that marks a node as a controlling player
pub const PLAYER_GROUP: &str = "Player";
