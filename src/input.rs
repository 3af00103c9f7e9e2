// Decoded input events. The window layer maps platform key codes and
// polled mouse state onto these; the controller never sees raw codes.

use crate::types::Channel;

/// Pointer position in canvas coordinates.
pub type Point = (i32, i32);

/// One decoded input event, dispatched one per loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Pointer(PointerEvent),
    Key(KeyAction),
    Quit,
}

/// Pointer event stream: motion plus left-button press/release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Move(Point),
    Press(Point),
    Release(Point),
}

/// Keyboard actions the editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// R / G / B choose the channel the arrows adjust.
    Select(Channel),
    /// Up arrow: raise the selected channel and flat-fill the canvas.
    Increase,
    /// Down arrow: lower the selected channel and flat-fill the canvas.
    Decrease,
}
