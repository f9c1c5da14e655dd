//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages the platform layer sends to the frame loop.
//
//=========================================================================

use crate::core::input::event::InputEvent;

/// One message on the platform → frame loop channel.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered since the previous redraw.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// The window was closed or could not be created.
    WindowClosed,
}
