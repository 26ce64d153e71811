//! Named motor references.

use heapless::String;
use serde::Deserialize;

/// A named motor: which driver it hangs on and at which output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MotorSpec {
    /// Driver name (must match a driver in config).
    pub driver: String<32>,

    /// Output index on that driver.
    pub output: u8,
}
