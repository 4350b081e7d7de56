mod buffer;
mod distance;
mod point;
mod point_set;
mod tree;
#[cfg(feature = "image")]
mod image;
pub mod config;
pub mod recolor;
pub mod search;

pub use buffer::PixelBuffer;
pub use distance::{ExhaustivePalette, ManhattanPalette};
pub use point::{l1_distance, Distance, Point3i};
pub use point_set::PointSet;
pub use recolor::{RecolorError, RecolorReport, Recolorer};
pub use search::{NearestNeighborSearch, PruningRule, SearchError, SearchResult};
pub use tree::{NodeIndex, PartitionTree, TreeNode};

// ====================
// PUBLIC TRAITS
// ====================

/// Finds the closest color of a fixed set of colors.
pub trait Palette {
    fn nearest(&self, color: Point3i) -> Option<Point3i>;

    fn nearest_rgb8(&self, color: RawColor) -> Option<RawColor> {
        self.nearest(color.into()).and_then(|nearest| nearest.to_rgb8())
    }
}

/// Produces the colors of an image.
pub trait PixelSource {

    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Every pixel in row-major order.
    fn pixels(&self) -> Box<dyn Iterator<Item=Point3i> + '_>;
}

/// Receives replacement colors for an image.
pub trait PixelSink {
    fn write(&mut self, row: u32, col: u32, color: Point3i);
}

// ====================
// PUBLIC TYPE ALIASES
// ====================

pub type RawColor = ::palette::Srgb<u8>;

// ====================
// PUBLIC FUNCTIONS
// ====================

/// Loads the palette and canvas images named in `config`, recolors the canvas and saves it.
#[cfg(feature = "image")]
pub fn run(config: &config::RecolorConfig) -> Result<RecolorReport, RecolorError> {
    let palette_image = ::image::open(&config.palette)?.to_rgb8();
    let recolorer = Recolorer::new(&palette_image, config.rule)?
        .with_parallelism(config.parallel);

    let canvas = ::image::open(&config.canvas)?.to_rgb8();
    let (width, height) = canvas.dimensions();
    let mut output = ::image::RgbImage::new(width, height);

    let report = recolorer.recolor(&canvas, &mut output)?;
    output.save(&config.output)?;

    Ok(report)
}
