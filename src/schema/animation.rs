//! Animation, curve, notification track and instance views.

use super::{first, flag, indices, names, relations, MaterialFile};
use crate::core::PropertyValues;
use crate::util::{Result, Vec3, Vec4};

node_view! {
    /// Clip holding curves and notification tracks.
    Animation => Animation
}

node_view! {
    /// Keyframes driving one property of one named node.
    Curve => Curve
}

node_view! {
    /// Named events keyed to frames.
    NotificationTrack => NotificationTrack
}

node_view! {
    /// Placement of an external scene file.
    Instance => Instance
}

impl<'a> Animation<'a> {
    pub fn framerate(&self) -> Option<f32> {
        first(&self.0, names::FRAMERATE)
    }

    pub fn looping(&self) -> bool {
        flag(&self.0, names::LOOP).unwrap_or(false)
    }

    pub fn curves(&self) -> Vec<Curve<'a>> {
        self.0.children().filter_map(Curve::new).collect()
    }

    pub fn notification_tracks(&self) -> Vec<NotificationTrack<'a>> {
        self.0.children().filter_map(NotificationTrack::new).collect()
    }
}

impl<'a> Curve<'a> {
    /// Name of the animated node (usually a bone).
    pub fn node_name(&self) -> Option<&'a str> {
        self.0.node().string(names::NODE_NAME).ok()
    }

    /// Animated channel ("tx", "rq", "bs", ...).
    pub fn key_property(&self) -> Option<&'a str> {
        self.0.node().string(names::KEY_PROPERTY).ok()
    }

    /// Frame numbers widened to u32.
    pub fn key_frames(&self) -> Result<Vec<u32>> {
        indices(&self.0, names::KEY_FRAME_BUFFER)
    }

    /// One value per key; the kind depends on the channel.
    pub fn key_values(&self) -> Result<&'a PropertyValues> {
        Ok(self.0.node().try_property(names::KEY_VALUE_BUFFER)?.values())
    }

    /// Blend mode ("additive", "absolute" or "relative").
    pub fn mode(&self) -> Option<&'a str> {
        self.0.node().string(names::MODE).ok()
    }

    pub fn additive_blend_weight(&self) -> Option<f32> {
        first(&self.0, names::ADDITIVE_BLEND_WEIGHT)
    }
}

impl<'a> NotificationTrack<'a> {
    pub fn key_frames(&self) -> Result<Vec<u32>> {
        indices(&self.0, names::KEY_FRAME_BUFFER)
    }
}

impl<'a> Instance<'a> {
    /// The referenced scene file, a sibling under the same parent.
    pub fn reference_file(&self) -> Option<MaterialFile<'a>> {
        self.0.resolve(relations::INSTANCE_REFERENCE_FILE).and_then(MaterialFile::new)
    }

    pub fn position(&self) -> Option<Vec3> {
        first(&self.0, names::POSITION)
    }

    pub fn rotation(&self) -> Option<Vec4> {
        first(&self.0, names::ROTATION)
    }

    pub fn scale(&self) -> Option<Vec3> {
        first(&self.0, names::SCALE)
    }
}
