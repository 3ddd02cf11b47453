use std::fmt;

use crate::domain::entities::alert::AlertFilter;

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Tanks,
    Metrics,
    Alerts,
}

impl ActivePanel {
    /// Cycle to the next panel.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Tanks => Self::Metrics,
            Self::Metrics => Self::Alerts,
            Self::Alerts => Self::Tanks,
        }
    }

    /// Cycle to the previous panel.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Tanks => Self::Alerts,
            Self::Metrics => Self::Tanks,
            Self::Alerts => Self::Metrics,
        }
    }
}

impl fmt::Display for ActivePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tanks => write!(f, "Tanks"),
            Self::Metrics => write!(f, "Metrics"),
            Self::Alerts => write!(f, "Alerts"),
        }
    }
}

/// Cycles the alert panel filter: all, active, acknowledged.
#[must_use]
pub const fn next_filter(filter: AlertFilter) -> AlertFilter {
    match filter {
        AlertFilter::All => AlertFilter::Active,
        AlertFilter::Active => AlertFilter::Acknowledged,
        AlertFilter::Acknowledged => AlertFilter::All,
    }
}

/// Index after `current` in a list of `count` items, wrapping to the top.
#[must_use]
pub fn wrap_next(current: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(current.map_or(0, |i| if i >= count - 1 { 0 } else { i + 1 }))
}

/// Index before `current`, wrapping to the bottom; no selection starts at the
/// last item.
#[must_use]
pub fn wrap_prev(current: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(current.map_or(count - 1, |i| if i == 0 { count - 1 } else { i - 1 }))
}
