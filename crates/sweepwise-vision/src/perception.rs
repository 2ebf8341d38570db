//! Frame-to-board reading with a per-tile cache.

use rayon::prelude::*;
use sweepwise_core::{Board, Position, Tile};

use crate::{ColorTable, Frame, ScanConfig, TileLayout, VisionError, classify};

/// A source of captured frames.
///
/// Implementations wrap whatever screen capture facility the platform offers.
/// Closures returning frames implement the trait too.
pub trait FrameGrabber {
    /// Captures the current game area.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Capture`] if the capture fails.
    fn grab(&mut self) -> Result<Frame, VisionError>;
}

impl<F> FrameGrabber for F
where
    F: FnMut() -> Result<Frame, VisionError>,
{
    fn grab(&mut self) -> Result<Frame, VisionError> {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedTile {
    bytes: Vec<u8>,
    tile: Tile,
}

/// The last raw pixels and classification of every tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCache {
    tiles: Vec<Option<CachedTile>>,
}

impl TileCache {
    fn new(len: usize) -> Self {
        Self {
            tiles: vec![None; len],
        }
    }

    /// Returns the cached classification of the tile at a row-major index.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index)?.as_ref().map(|cached| cached.tile)
    }

    /// Returns the number of tiles that have been classified at least once.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.tiles.iter().flatten().count()
    }

    /// Forgets every cached tile.
    pub fn clear(&mut self) {
        self.tiles.fill(None);
    }
}

/// Counters of the most recent [`Perception::read`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    /// Tiles that were classified from their pixels.
    pub classified: usize,
    /// Tiles whose pixels were unchanged and came from the cache.
    pub reused: usize,
}

/// Reads boards from frames.
///
/// Tiles are classified in parallel. A tile whose raw pixels are identical to
/// the previous read keeps its previous classification without a rescan.
#[derive(Debug, Clone)]
pub struct Perception {
    layout: TileLayout,
    table: ColorTable,
    scan: ScanConfig,
    cache: TileCache,
    last_stats: ReadStats,
}

impl Perception {
    /// Creates a reader with an empty cache.
    #[must_use]
    pub fn new(layout: TileLayout, table: ColorTable, scan: ScanConfig) -> Self {
        Self {
            cache: TileCache::new(layout.dims().area()),
            layout,
            table,
            scan,
            last_stats: ReadStats::default(),
        }
    }

    /// Returns the tile layout.
    #[must_use]
    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// Returns the color table.
    #[must_use]
    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    /// Returns the tile cache.
    #[must_use]
    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    /// Returns the counters of the most recent read.
    #[must_use]
    pub fn last_stats(&self) -> ReadStats {
        self.last_stats
    }

    /// Reads a board from a frame and refreshes the cache.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::FrameTooSmall`] if the frame does not cover the
    /// layout.
    pub fn read(&mut self, frame: &Frame) -> Result<Board, VisionError> {
        self.layout.check_frame(frame.width(), frame.height())?;

        let dims = self.layout.dims();
        let positions: Vec<Position> = dims.positions().collect();
        let results: Vec<(CachedTile, bool)> = positions
            .par_iter()
            .zip(self.cache.tiles.par_iter())
            .map(|(&pos, cached)| {
                let rect = self.layout.tile_rect(pos);
                let bytes = frame.region_bytes(rect);
                match cached {
                    Some(cached) if cached.bytes == bytes => (cached.clone(), true),
                    _ => {
                        let tile = classify(frame, rect, &self.table, &self.scan);
                        (CachedTile { bytes, tile }, false)
                    }
                }
            })
            .collect();

        let mut board = Board::new(dims);
        let mut stats = ReadStats::default();
        for ((pos, slot), (cached, reused)) in positions
            .into_iter()
            .zip(&mut self.cache.tiles)
            .zip(results)
        {
            board[pos] = cached.tile;
            *slot = Some(cached);
            if reused {
                stats.reused += 1;
            } else {
                stats.classified += 1;
            }
        }
        log::debug!(
            "read {dims} board: {} tiles classified, {} reused",
            stats.classified,
            stats.reused
        );
        self.last_stats = stats;
        Ok(board)
    }

    /// Grabs a frame and reads it.
    ///
    /// # Errors
    ///
    /// Returns the grabber's error, or any error of [`Perception::read`].
    pub fn capture<G>(&mut self, grabber: &mut G) -> Result<Board, VisionError>
    where
        G: FrameGrabber + ?Sized,
    {
        let frame = grabber.grab()?;
        self.read(&frame)
    }
}
