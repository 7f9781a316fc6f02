use serde::{Deserialize, Serialize};

/// Ordering slot shared by event listeners and tickables.
///
/// Lower variants run first: `Early` before everything, `PostMonitor` last.
/// `Monitor` and `PostMonitor` are meant for observers that should see the
/// final state of an event or tick.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    Early,
    Lowest,
    Lower,
    Low,
    #[default]
    Normal,
    High,
    Higher,
    Monitor,
    PostMonitor,
}

impl Priority {
    /// All nine levels in dispatch order.
    pub const ALL: [Priority; 9] = [
        Priority::Early,
        Priority::Lowest,
        Priority::Lower,
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Higher,
        Priority::Monitor,
        Priority::PostMonitor,
    ];
}
