use log::warn;
use opencv::highgui;

/// Closes every highgui window on drop, so windows come down on error
/// returns as well as on the normal path.
pub struct WindowGuard;

impl Drop for WindowGuard {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            warn!("closing windows failed: {}", e);
        }
    }
}
