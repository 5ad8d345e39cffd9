//! Controller initialization state

/// Initialization progress of a display controller
///
/// Strictly linear; there are no backward transitions. The state is
/// diagnostic - drawing and flushing are never gated on it, matching
/// the fire-and-forget model of a status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Fresh controller, transport not yet exercised
    Uninitialized,
    /// Transport constructed and usable
    TransportReady,
    /// Hardware reset sequence completed
    Reset,
    /// Fixed configuration script transmitted
    ConfigurationScripted,
    /// Display enabled and showing framebuffer content
    On,
}
