/// Reasons an enhancement call can fail.
#[derive(Clone, Debug, PartialEq)]
pub enum EnhanceError {
    /// The channel cannot be processed (multi-channel, empty, truncated, ...).
    InvalidInput { reason: String },
    /// A transform curve was requested from an empty set of edge pairs.
    EmptyEvidence { level: Option<u8> },
    /// Region boundary fractions do not describe three non-empty ranges.
    DegenerateRegion { lower: f32, upper: f32 },
    /// A scalar parameter is outside its admissible range.
    InvalidParameter { name: &'static str, value: f32 },
}

impl EnhanceError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        EnhanceError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnhanceError::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            EnhanceError::EmptyEvidence { level: Some(level) } => {
                write!(f, "no edge pairs touch intensity {level}")
            }
            EnhanceError::EmptyEvidence { level: None } => {
                write!(f, "transform curve requested from an empty pair set")
            }
            EnhanceError::DegenerateRegion { lower, upper } => write!(
                f,
                "degenerate region bounds ({lower:.3}, {upper:.3}); need 0 ≤ lower ≤ upper ≤ 1"
            ),
            EnhanceError::InvalidParameter { name, value } => {
                write!(f, "parameter `{name}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for EnhanceError {}
