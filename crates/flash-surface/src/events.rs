//! Surface mutation events consumed by the lifecycle loop.

use crate::MountId;

/// A change the lifecycle loop reacts to, delivered in FIFO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A new mount element appeared on the surface.
    MountInserted(MountId),
    /// A mount's source attribute was rewritten.
    SourceChanged(MountId),
    /// History/hash navigation; all mounts are re-scanned.
    Navigated,
}
