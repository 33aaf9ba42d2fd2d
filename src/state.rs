#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NavigationPhase {
    Idle,        // Accepting move requests
    CoolingDown, // An accepted move is still in its cool-down window
}

/// Why the last move request was not applied. Purely diagnostic: callers of
/// the navigation operations never have to look at it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Rejection {
    OutOfRange { target: i64 },
    Busy,
    TooSoon,
}
