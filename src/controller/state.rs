//! Controller states

/// Where the controller is in its single advertising cycle
///
/// ```text
/// AwaitingInput -> Validating -> AwaitingInput   (rejected)
///                             -> Composing -> Advertising
///                                          -> Halted  (fatal error)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Prompting for and reading a coordinate
    AwaitingInput,
    /// Checking the coordinate format
    Validating,
    /// Splitting, encoding and handing the records to the radio
    Composing,
    /// Advertising until reset
    Advertising,
    /// A fatal error stopped the cycle; idle until reset
    Halted,
}

/// Operator-facing text
pub mod messages {
    pub const STARTED: &str = "Coordinate beacon started.";
    pub const PROMPT: &str = "Enter the GPS coordinates";
    pub const FORMAT_INTRO: &str = "Accepted format is";
    pub const EXAMPLE_INTRO: &str = "An example of the expected format is";
    pub const REJECTED: &str =
        "GPS coordinates are not in the expected format. Please enter them according to the format.";
    pub const ACCEPTED: &str = "You have entered the following coordinates:";
    pub const ADVERTISING: &str = "Beacon started, advertising coordinates...";
    pub const FATAL: &str = "Fatal error, advertising halted until reset:";
}
