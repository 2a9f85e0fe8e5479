use strata_image::Image;

/// Best-effort display of images.
///
/// Implementations must not block the pipeline; nothing in the pipeline depends on what they do.
pub trait ImageViewer {
    /// Show an image under a window title.
    fn show<const C: usize>(&self, title: &str, image: &Image<u8, C>);

    /// Wait for the user before closing.
    fn wait_for_input(&self) {}

    /// Close everything opened by [`ImageViewer::show`].
    fn close_all(&self) {}
}

/// A viewer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopViewer;

impl ImageViewer for NoopViewer {
    fn show<const C: usize>(&self, _title: &str, _image: &Image<u8, C>) {}
}

/// A headless viewer that logs what would be shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogViewer;

impl ImageViewer for LogViewer {
    fn show<const C: usize>(&self, title: &str, image: &Image<u8, C>) {
        log::info!("{title}: {} with {} channels", image.size(), C);
    }

    fn close_all(&self) {
        log::debug!("closing all views");
    }
}
