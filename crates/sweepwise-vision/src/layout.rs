use sweepwise_core::{Dimensions, Position};

use crate::VisionError;

/// An axis-aligned pixel rectangle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: usize,
    /// Top edge.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the pixel at the middle of the rectangle.
    #[must_use]
    pub const fn center(self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// How a capture is cut into a grid of equally sized tiles.
///
/// # Examples
///
/// ```
/// use sweepwise_core::{Dimensions, Position};
/// use sweepwise_vision::{Rect, TileLayout};
///
/// // A 600x500 capture of a 20x24 board has 25x25 tiles.
/// let layout = TileLayout::for_frame(600, 500, Dimensions::new(20, 24))?;
/// assert_eq!(layout.tile_rect(Position::new(1, 2)), Rect::new(50, 25, 25, 25));
/// # Ok::<(), sweepwise_vision::VisionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    dims: Dimensions,
    tile_width: usize,
    tile_height: usize,
}

impl TileLayout {
    /// Creates a layout with explicit tile sizes.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::EmptyTiles`] if the board or the tiles are empty.
    pub fn new(dims: Dimensions, tile_width: usize, tile_height: usize) -> Result<Self, VisionError> {
        if dims.area() == 0 || tile_width == 0 || tile_height == 0 {
            return Err(VisionError::EmptyTiles { dims });
        }
        Ok(Self {
            dims,
            tile_width,
            tile_height,
        })
    }

    /// Derives the tile size by dividing the frame evenly.
    ///
    /// Leftover pixels on the right and bottom edges are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::EmptyTiles`] if the frame is too small to give
    /// every tile at least one pixel.
    pub fn for_frame(width: usize, height: usize, dims: Dimensions) -> Result<Self, VisionError> {
        if dims.area() == 0 {
            return Err(VisionError::EmptyTiles { dims });
        }
        Self::new(dims, width / dims.cols, height / dims.rows)
    }

    /// Returns the board size.
    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Returns the tile width in pixels.
    #[must_use]
    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    /// Returns the tile height in pixels.
    #[must_use]
    pub fn tile_height(&self) -> usize {
        self.tile_height
    }

    /// Returns the frame width the layout covers.
    #[must_use]
    pub fn width(&self) -> usize {
        self.tile_width * self.dims.cols
    }

    /// Returns the frame height the layout covers.
    #[must_use]
    pub fn height(&self) -> usize {
        self.tile_height * self.dims.rows
    }

    /// Returns the pixel rectangle of a tile.
    #[must_use]
    pub fn tile_rect(&self, pos: Position) -> Rect {
        Rect::new(
            pos.col() * self.tile_width,
            pos.row() * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }

    /// Returns the board position under a pixel, if any.
    #[must_use]
    pub fn position_at(&self, x: usize, y: usize) -> Option<Position> {
        let pos = Position::new(y / self.tile_height, x / self.tile_width);
        self.dims.contains(pos).then_some(pos)
    }

    pub(crate) fn check_frame(&self, width: usize, height: usize) -> Result<(), VisionError> {
        if width < self.width() || height < self.height() {
            return Err(VisionError::FrameTooSmall {
                width,
                height,
                dims: self.dims,
                tile_width: self.tile_width,
                tile_height: self.tile_height,
            });
        }
        Ok(())
    }
}
