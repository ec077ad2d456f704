//! Smooth scrolling with exponential ease-out.
//!
//! The logical target moves instantly; the rendered position lags behind it
//! by a displacement that decays every frame, so long jumps decelerate
//! visibly as they land.  Used for both the page (vertical) and the
//! category bar (horizontal).

/// Position animator over one scroll axis.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Where the scroll is heading.
    target: f64,
    /// Rendered position minus target.  Positive = still short of a target
    /// that lies further up / left.
    displacement: f64,
    /// Damping: `displacement *= (1 - speed)` each tick.
    speed: f64,
}

impl SmoothScroll {
    /// Displacements smaller than this snap to zero.
    const SETTLE: f64 = 0.4;

    pub fn new(speed: f64) -> Self {
        Self {
            target: 0.0,
            displacement: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Animate from the current position toward `target`.
    pub fn scroll_to(&mut self, target: f64) {
        let position = self.position();
        self.target = target;
        self.displacement = position - target;
        if self.displacement.abs() < Self::SETTLE {
            self.displacement = 0.0;
        }
    }

    /// Move without animation.
    pub fn jump_to(&mut self, target: f64) {
        self.target = target;
        self.displacement = 0.0;
    }

    /// Decay the displacement toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        self.displacement *= 1.0 - self.speed;
        if self.displacement.abs() < Self::SETTLE {
            self.displacement = 0.0;
        }
    }

    /// Current rendered position.
    pub fn position(&self) -> f64 {
        self.target + self.displacement
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True while the position has not yet landed on the target.
    pub fn is_animating(&self) -> bool {
        self.displacement != 0.0
    }
}
