//! Runtime axis state.

/// Coarse state of the axis.
///
/// `halt()` is the only way back to `Idle` and can be issued from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisState {
    /// Driver de-energized, no move in flight.
    #[default]
    Idle,
    /// Driver energized, position changing.
    Moving,
}

impl AxisState {
    /// Get the state name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            AxisState::Idle => "Idle",
            AxisState::Moving => "Moving",
        }
    }
}
