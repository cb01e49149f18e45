//! The lifecycle loop: surface events drained in FIFO arrival order.

use flash_surface::SurfaceEvent;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::Runtime;

impl Runtime {
    /// Run the lifecycle loop until `cancel` fires or the surface drops its
    /// event sender.
    ///
    /// Starts with a full scan so mounts inserted before the loop started
    /// are picked up, then processes events one at a time. A redirect
    /// triggered mid-pass queues a `SourceChanged` that the loop handles on
    /// a later iteration, so chained redirects settle one hop per event.
    pub async fn run(&self, mut events: UnboundedReceiver<SurfaceEvent>, cancel: CancellationToken) {
        self.scan().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("lifecycle loop cancelled");
                    return;
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        debug!("surface event channel closed");
                        return;
                    };
                    self.handle_event(event).await;
                }
            }
        }
    }

    /// Process every mount currently on the surface.
    pub async fn scan(&self) {
        for id in self.surface.mount_ids() {
            self.process_mount(id).await;
        }
    }

    /// Apply one surface event.
    pub async fn handle_event(&self, event: SurfaceEvent) {
        trace!(?event, "surface event");
        match event {
            SurfaceEvent::MountInserted(id) => self.process_mount(id).await,
            SurfaceEvent::SourceChanged(id) => {
                // A source change invalidates the previous render.
                self.surface.set_done(id, false);
                self.process_mount(id).await;
            }
            SurfaceEvent::Navigated => self.scan().await,
        }
    }
}
