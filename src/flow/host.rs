/// The screen a flow presents its container on.
///
/// Presentation at this level is not animated: all visible motion comes from
/// the container's own transitions. The host only has to show or hide the
/// overlay layer.
pub trait PresentationHost {
    /// Show the container overlay. Returns `false` when the host refuses, in
    /// which case the flow does nothing further.
    fn present(&self) -> bool;

    /// Hide the container overlay.
    fn dismiss(&self);
}
