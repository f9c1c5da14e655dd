//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit platform layer and the frame loop.
//
// Components:
// - `interface`: messages sent over the channel
// - `event_collector`: frame-side draining of those messages
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub use event_collector::TickControl;
pub(crate) use interface::PlatformEvent;
