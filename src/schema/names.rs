//! Property names used by the standard node kinds.
//!
//! Keys are reused across kinds with different meanings (`p` is a bone's
//! parent index but a file's path), so they are only meaningful together with
//! the node kind they appear on.

pub const NAME: &str = "n";

// Mesh
pub const VERTEX_POSITION_BUFFER: &str = "vp";
pub const VERTEX_NORMAL_BUFFER: &str = "vn";
pub const VERTEX_TANGENT_BUFFER: &str = "vt";
pub const VERTEX_COLOR_BUFFER: &str = "vc";
pub const VERTEX_WEIGHT_BONE_BUFFER: &str = "wb";
pub const VERTEX_WEIGHT_VALUE_BUFFER: &str = "wv";
pub const FACE_BUFFER: &str = "f";
pub const UV_LAYER_COUNT: &str = "ul";
pub const MAXIMUM_WEIGHT_INFLUENCE: &str = "mi";
pub const SKINNING_METHOD: &str = "sm";
pub const MATERIAL: &str = "m";

/// Name of the UV buffer for `layer` (`u0`, `u1`, ...).
pub fn vertex_uv_buffer(layer: usize) -> String {
    format!("u{}", layer)
}

// Blend shape
pub const BASE_SHAPE: &str = "b";
pub const TARGET_SHAPE: &str = "t";
pub const TARGET_WEIGHT_SCALE: &str = "ts";

// Bone
pub const PARENT_INDEX: &str = "p";
pub const SEGMENT_SCALE_COMPENSATE: &str = "ssc";
pub const LOCAL_POSITION: &str = "lp";
pub const LOCAL_ROTATION: &str = "lr";
pub const WORLD_POSITION: &str = "wp";
pub const WORLD_ROTATION: &str = "wr";
pub const SCALE: &str = "s";

// IK handle
pub const START_BONE: &str = "sb";
pub const END_BONE: &str = "eb";
pub const TARGET_BONE: &str = "tb";
pub const POLE_VECTOR_BONE: &str = "pv";
pub const POLE_BONE: &str = "pb";
pub const TARGET_ROTATION: &str = "tr";

// Constraint
pub const CONSTRAINT_TYPE: &str = "ct";
pub const CONSTRAINT_BONE: &str = "cb";
pub const MAINTAIN_OFFSET: &str = "mo";
pub const SKIP_X: &str = "sx";
pub const SKIP_Y: &str = "sy";
pub const SKIP_Z: &str = "sz";

// Material / file
pub const TYPE: &str = "t";
pub const PATH: &str = "p";

// Animation / curve
pub const FRAMERATE: &str = "fr";
pub const LOOP: &str = "lo";
pub const NODE_NAME: &str = "nn";
pub const KEY_PROPERTY: &str = "kp";
pub const KEY_FRAME_BUFFER: &str = "kb";
pub const KEY_VALUE_BUFFER: &str = "kv";
pub const MODE: &str = "m";
pub const ADDITIVE_BLEND_WEIGHT: &str = "ab";

// Instance
pub const REFERENCE_FILE: &str = "rf";
pub const POSITION: &str = "p";
pub const ROTATION: &str = "r";
