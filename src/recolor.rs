use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};
use log::{debug, info, trace, warn};
use thiserror::Error;
use crate::{ManhattanPalette, PartitionTree, PixelSink, PixelSource, Point3i, PointSet, PruningRule, SearchError, SearchResult};
use crate::point::Distance;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ====================
// PUBLIC CONSTANTS
// ====================

/// Palettes larger than this are unusual and usually mean a photo was passed as the palette.
pub const LARGE_PALETTE: usize = 4096;

// ====================
// PUBLIC STRUCTS
// ====================

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RecolorError {
    #[error("palette image contains no colors")]
    EmptyPalette,
    #[error(transparent)]
    Search(#[from] SearchError),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError)
}

/// Statistics about one recolored canvas.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RecolorReport {
    pub palette_colors: usize,
    pub canvas_colors: usize,
    pub pixels: usize,
    pub exact_matches: usize,
    pub visited_nodes: usize,
    pub max_distance: Distance,
    pub gather_time: Duration,
    pub build_time: Duration,
    pub convert_time: Duration
}

impl RecolorReport {
    pub fn visited_per_pixel(&self) -> f64 {
        if self.pixels == 0 {
            return 0.0;
        }

        self.visited_nodes as f64 / self.pixels as f64
    }
}

impl Display for RecolorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Palette colors: {}", self.palette_colors)?;
        writeln!(f, "Time to gather palette colors: {} ms", self.gather_time.as_millis())?;
        writeln!(f, "Time to build tree: {} ms", self.build_time.as_millis())?;
        writeln!(f, "Canvas colors: {}", self.canvas_colors)?;
        writeln!(f, "Pixels: {}", self.pixels)?;
        writeln!(f, "Exact matches: {}", self.exact_matches)?;
        writeln!(f, "Visited nodes: {} ({:.2} per pixel)", self.visited_nodes, self.visited_per_pixel())?;
        writeln!(f, "Max distance: {}", self.max_distance)?;
        write!(f, "Time of conversion: {} ms", self.convert_time.as_millis())
    }
}

/// Maps canvas pixels onto the colors of a palette.
///
/// The tree is built once in [`Recolorer::new`]; every call to [`Recolorer::recolor`]
/// only reads it.
#[derive(Clone, Debug)]
pub struct Recolorer {
    palette: ManhattanPalette,
    parallel: bool,
    gather_time: Duration,
    build_time: Duration
}

impl Recolorer {
    pub fn new<P: PixelSource + ?Sized>(palette_source: &P, rule: PruningRule) -> Result<Self, RecolorError> {
        let start = Instant::now();
        let colors = PointSet::build(palette_source.pixels());
        let gather_time = start.elapsed();

        info!("Palette colors: {}", colors.len());
        info!("Time to gather palette colors: {} ms", gather_time.as_millis());

        let mut recolorer = Recolorer::from_colors(&colors, rule)?;
        recolorer.gather_time = gather_time;
        Ok(recolorer)
    }

    pub fn from_colors(colors: &PointSet, rule: PruningRule) -> Result<Self, RecolorError> {
        if colors.is_empty() {
            return Err(RecolorError::EmptyPalette);
        }

        if colors.len() > LARGE_PALETTE {
            warn!("Palette has {} colors; is the palette image a photo?", colors.len());
        }

        let start = Instant::now();
        let tree = build_tree(colors);
        let build_time = start.elapsed();

        info!("Time to build tree: {} ms", build_time.as_millis());
        debug!("Tree height: {} for {} colors, pruning rule: {}", tree.height(), tree.len(), rule);

        Ok(Recolorer {
            palette: ManhattanPalette::from_tree(tree, rule),
            parallel: cfg!(feature = "parallel"),
            gather_time: Duration::ZERO,
            build_time
        })
    }

    /// Chooses whether pixel lookups are spread over threads. Without the `parallel`
    /// feature this has no effect.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn palette(&self) -> &ManhattanPalette {
        &self.palette
    }

    /// Writes the nearest palette color of every canvas pixel to `sink`.
    pub fn recolor<S, K>(&self, canvas: &S, sink: &mut K) -> Result<RecolorReport, RecolorError>
        where S: PixelSource + ?Sized, K: PixelSink + ?Sized {
        let start = Instant::now();
        let (width, _) = canvas.dimensions();
        let colors: Vec<Point3i> = canvas.pixels().collect();
        let canvas_colors = PointSet::build(colors.iter().copied()).len();

        let results = self.search_all(&colors)?;

        let mut report = RecolorReport {
            palette_colors: self.palette.len(),
            canvas_colors,
            pixels: colors.len(),
            gather_time: self.gather_time,
            build_time: self.build_time,
            ..RecolorReport::default()
        };

        // A zero width can only come with zero pixels
        let width = width.max(1) as usize;

        for (index, (&color, result)) in colors.iter().zip(&results).enumerate() {
            let row = (index / width) as u32;
            let col = (index % width) as u32;

            trace!(
                "Exchanged pixel [{}][{}], color {} with color {}. Distance: {}, visited nodes: {}",
                row, col, color, result.point(), result.distance(), result.visited()
            );

            sink.write(row, col, result.point());

            report.visited_nodes += result.visited();
            report.max_distance = report.max_distance.max(result.distance());
            if result.distance() == 0 {
                report.exact_matches += 1;
            }
        }

        report.convert_time = start.elapsed();

        info!("Canvas colors: {}", report.canvas_colors);
        info!("Time of conversion: {} ms", report.convert_time.as_millis());

        Ok(report)
    }

    fn search_all(&self, colors: &[Point3i]) -> Result<Vec<SearchResult>, SearchError> {
        #[cfg(feature = "parallel")]
        if self.parallel {
            return colors.par_iter()
                .map(|&color| self.palette.search(color))
                .collect();
        }

        colors.iter()
            .map(|&color| self.palette.search(color))
            .collect()
    }
}

// ====================
// PRIVATE FUNCTIONS
// ====================

#[cfg(feature = "parallel")]
fn build_tree(colors: &PointSet) -> PartitionTree {
    PartitionTree::build_parallel(colors)
}

#[cfg(not(feature = "parallel"))]
fn build_tree(colors: &PointSet) -> PartitionTree {
    PartitionTree::build(colors)
}
