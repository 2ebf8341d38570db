use sweepwise_core::{Dimensions, Tile};

/// Errors produced while reading a board from a capture.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum VisionError {
    /// The pixel buffer does not match the stated frame size.
    #[display("frame of {width}x{height} needs {expected} pixels, got {actual}")]
    PixelCount {
        /// Frame width in pixels.
        width: usize,
        /// Frame height in pixels.
        height: usize,
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// The frame is smaller than the tile layout needs.
    #[display(
        "frame of {width}x{height} cannot hold a {dims} board of {tile_width}x{tile_height} tiles"
    )]
    FrameTooSmall {
        /// Frame width in pixels.
        width: usize,
        /// Frame height in pixels.
        height: usize,
        /// Board size of the layout.
        dims: Dimensions,
        /// Tile width in pixels.
        tile_width: usize,
        /// Tile height in pixels.
        tile_height: usize,
    },
    /// A layout would have tiles without pixels.
    #[display("a {dims} board leaves no pixels per tile")]
    EmptyTiles {
        /// Board size of the layout.
        dims: Dimensions,
    },
    /// The color table has no color to paint a tile with.
    #[display("no color to render {tile:?} tiles")]
    MissingColor {
        /// The tile that could not be painted.
        tile: Tile,
    },
    /// The frame grabber failed.
    #[display("capture failed: {message}")]
    Capture {
        /// Grabber-specific description.
        message: String,
    },
}
