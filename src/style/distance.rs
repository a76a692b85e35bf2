/// How a nominal distance value turns into a concrete one.
///
/// `Grow` and `Shrink` are reserved: they are accepted by the style model but
/// no resolution pass consumes them yet, so they resolve to the nominal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMode {
    #[default]
    Absolute,
    Relative,
    Grow,
    Shrink,
}

/// A distance that may be absolute or proportional to a comparison extent.
///
/// A default-constructed distance is "unset": layout treats it as absent and
/// it resolves to zero rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Distance {
    value: f32,
    mode: DistanceMode,
    set: bool,
}

impl Distance {
    pub fn px(value: f32) -> Self {
        Self {
            value,
            mode: DistanceMode::Absolute,
            set: true,
        }
    }

    /// A percentage of the comparison extent; stored as a fraction.
    pub fn pct(percentage: f32) -> Self {
        Self {
            value: percentage / 100.0,
            mode: DistanceMode::Relative,
            set: true,
        }
    }

    pub fn grow() -> Self {
        Self {
            value: 0.0,
            mode: DistanceMode::Grow,
            set: true,
        }
    }

    pub fn shrink() -> Self {
        Self {
            value: 0.0,
            mode: DistanceMode::Shrink,
            set: true,
        }
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    /// True when this distance carries a fixed value that overrides any
    /// computed size.
    pub fn is_absolute(&self) -> bool {
        self.set && self.mode == DistanceMode::Absolute
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn mode(&self) -> DistanceMode {
        self.mode
    }

    pub fn resolve(&self, compare: f32) -> f32 {
        match self.mode {
            DistanceMode::Absolute => self.value,
            DistanceMode::Relative => self.value * compare,
            DistanceMode::Grow | DistanceMode::Shrink => self.value,
        }
    }
}
