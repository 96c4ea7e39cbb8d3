//! Input events understood by a viewer.

use crate::source::ModelSource;

/// Something the user did to a viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    /// The play button was clicked.
    PlayPressed,
    /// The retry button was clicked.
    RetryPressed,
    /// A file is being dragged over the viewer.
    FileHovered,
    /// The dragged file left the viewer.
    FileHoverCancelled,
    /// A file was dropped onto the viewer.
    FileDropped(ModelSource),
    /// The container was resized, in pixels.
    Resized {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
}

#[cfg(feature = "winit")]
impl ViewerEvent {
    /// Translates a window event, if it means anything to a viewer.
    ///
    /// Dropped files are passed by path; the decoder reads them.
    pub fn from_winit(event: &winit::event::WindowEvent) -> Option<ViewerEvent> {
        use winit::event::WindowEvent;

        match event {
            WindowEvent::DroppedFile(path) => {
                Some(ViewerEvent::FileDropped(ModelSource::from(path.as_path())))
            }
            WindowEvent::HoveredFile(_) => Some(ViewerEvent::FileHovered),
            WindowEvent::HoveredFileCancelled => Some(ViewerEvent::FileHoverCancelled),
            WindowEvent::Resized(size) => Some(ViewerEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}
