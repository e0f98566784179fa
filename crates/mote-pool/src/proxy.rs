//! Pooled circle collider proxies.

use glam::{Vec2, Vec3};
use mote_common::{EntityId, Layer};

use crate::stats::CharacterStats;

/// One pooled 2D circle collider.
///
/// Geometry is rewritten every step the proxy is active. Tag, layer, parent
/// and stats are fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderProxy {
    /// World position
    position: Vec3,
    /// Circle radius (never negative)
    radius: f32,
    /// Trigger rather than solid collider
    is_trigger: bool,
    /// Tag from the pool configuration
    tag: String,
    /// Collision layer
    layer: Layer,
    /// Owning manager, unless spawned parent-less
    parent: Option<EntityId>,
    /// Stats copied from the pool configuration
    stats: Option<CharacterStats>,
}

impl ColliderProxy {
    /// Creates a zero-radius proxy at the origin.
    #[must_use]
    pub fn new(tag: impl Into<String>, layer: Layer) -> Self {
        Self {
            position: Vec3::ZERO,
            radius: 0.0,
            is_trigger: false,
            tag: tag.into(),
            layer,
            parent: None,
            stats: None,
        }
    }

    /// Sets the owning entity.
    #[must_use]
    pub fn with_parent(mut self, parent: Option<EntityId>) -> Self {
        self.parent = parent;
        self
    }

    /// Attaches a stats payload.
    #[must_use]
    pub fn with_stats(mut self, stats: Option<CharacterStats>) -> Self {
        self.stats = stats;
        self
    }

    /// World position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Position projected onto the 2D physics plane.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Moves the proxy.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Circle radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius, clamping negative values to zero.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    /// Whether the collider is a trigger.
    #[must_use]
    pub const fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    /// Sets the trigger flag.
    pub fn set_trigger(&mut self, is_trigger: bool) {
        self.is_trigger = is_trigger;
    }

    /// Tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Collision layer.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    /// Owning entity, if parented.
    #[must_use]
    pub const fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Stats payload, if configured.
    #[must_use]
    pub const fn stats(&self) -> Option<&CharacterStats> {
        self.stats.as_ref()
    }

    /// Checks whether this circle intersects another circle.
    #[must_use]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let reach = self.radius + radius;
        self.center().distance_squared(center) <= reach * reach
    }
}
