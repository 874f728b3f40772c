/// Letter grade for a finished quiz, derived from the score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Map a rounded score percentage to a grade.
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::APlus,
            80..=89 => Self::A,
            70..=79 => Self::B,
            60..=69 => Self::C,
            50..=59 => Self::D,
            _ => Self::F,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::APlus => "Outstanding!",
            Self::A => "Excellent!",
            Self::B => "Great Job!",
            Self::C => "Good Effort!",
            Self::D => "Keep Trying!",
            Self::F => "Need Improvement",
        }
    }

    /// Accent colour used by the results screen.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::APlus | Self::A => "#10b981",
            Self::B => "#3b82f6",
            Self::C => "#f59e0b",
            Self::D => "#f97316",
            Self::F => "#ef4444",
        }
    }
}
