use glam::Vec2;

/// Identifies the pointer that owns a gesture.
pub type PointerId = u64;

/// One pointer event as delivered by the host, in screen space (y grows
/// downward). Consumed immediately; nothing keeps it past the update step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    pub position: Vec2,
    /// Pointer velocity in px/s.
    pub velocity: Vec2,
    /// Translation since the gesture began, in px.
    pub translation: Vec2,
}

impl GestureSample {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    pub fn with_translation(mut self, tx: f32, ty: f32) -> Self {
        self.translation = Vec2::new(tx, ty);
        self
    }
}

/// Which way a control is currently being pushed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Increasing,
    Decreasing,
    #[default]
    Idle,
}

impl Direction {
    pub fn of_delta(delta: f32) -> Self {
        if delta > 0.0 {
            Direction::Increasing
        } else if delta < 0.0 {
            Direction::Decreasing
        } else {
            Direction::Idle
        }
    }
}
