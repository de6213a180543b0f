//! Raster scan driver.
//!
//! Cells are visited row by row, including one ring of cells straddling the
//! raster edge, so every boundary is closed off by the time the scan ends.
//! Each cell's segments go straight into the segment graph and rings are
//! extracted the moment they close.

use crate::cell::CellCode;
use crate::contour::{Contour, ContourParams};
use crate::error::ContourError;
use crate::raster::BinaryRaster;
use crate::saddle::{FixedSaddle, SaddleMemory, SaddleResolver};
use crate::segment_graph::SegmentGraph;
use crate::segment_table::{border_segments, interior_segments, mark_border};
use std::time::Instant;

/// Largest raster side whose doubled cell coordinates still fit in `i32`.
pub const MAX_RASTER_SIDE: usize = (i32::MAX / 2 - 2) as usize;

fn cell_bounds(width: usize, height: usize) -> Result<(i32, i32), ContourError> {
    if width > MAX_RASTER_SIDE || height > MAX_RASTER_SIDE {
        return Err(ContourError::RasterTooLarge {
            width,
            height,
            max: MAX_RASTER_SIDE,
        });
    }
    Ok((width as i32, height as i32))
}

/// A predicate sampled inside `width x height`, unset everywhere else.
struct SampledRaster<F> {
    width: usize,
    height: usize,
    sample: F,
}

impl<F> BinaryRaster for SampledRaster<F>
where
    F: Fn(i32, i32) -> bool,
{
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (self.sample)(x, y)
    }
}

/// Single pass over all cells of `raster`.
fn trace<R, S>(raster: &R, resolver: &mut S, params: &ContourParams) -> Result<Contour, ContourError>
where
    R: BinaryRaster + ?Sized,
    S: SaddleResolver + ?Sized,
{
    let scan_start = Instant::now();
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Ok(Contour::empty(width, height));
    }

    let (w, h) = cell_bounds(width, height)?;
    let offset = params.pixel_origin.offset();
    let mut graph = SegmentGraph::new();
    let mut contour = Contour::empty(width, height);

    for j in -1..h {
        for i in -1..w {
            let code = CellCode::classify(raster, i, j);
            if code.is_uniform() {
                continue;
            }

            let on_border = i == -1 || j == -1 || i == w - 1 || j == h - 1;
            let segments = if on_border {
                border_segments(i, j, code)
            } else {
                interior_segments(i, j, code, resolver)
            };
            mark_border(&mut contour.border, i, j, code);

            for segment in segments {
                if let Some(leader) = graph.insert(segment)? {
                    let ring = graph.extract_ring(leader, params.join_straight_segments, offset)?;
                    contour.rings.push(ring);
                }
            }
        }
    }

    let stranded = graph.live();
    if stranded > 0 {
        return Err(ContourError::StrandedSegments { count: stranded });
    }

    log::debug!(
        "[raster-contours] traced {}x{} raster: {} segments, {} rings, {} vertices in {:?}",
        width,
        height,
        graph.total(),
        contour.rings.len(),
        contour.vertex_count(),
        scan_start.elapsed()
    );

    Ok(contour)
}

/// Trace all region boundaries of `raster`.
///
/// Saddle cells join their set corners, so diagonal neighbors end up in the
/// same ring.
///
/// # Example
///
/// ```
/// use raster_contours::{find_contour, ContourParams, RasterMask};
///
/// let mask = RasterMask::from_ascii(
///     "....
///      .##.
///      .##.
///      ....",
/// );
/// let contour = find_contour(&mask, &ContourParams::default()).unwrap();
/// assert_eq!(contour.rings.len(), 1);
/// ```
pub fn find_contour<R>(raster: &R, params: &ContourParams) -> Result<Contour, ContourError>
where
    R: BinaryRaster + ?Sized,
{
    trace(raster, &mut FixedSaddle::default(), params)
}

/// Trace the region where `sample(x, y)` holds inside `width x height`.
pub fn find_contour_by<F>(
    width: usize,
    height: usize,
    sample: F,
    params: &ContourParams,
) -> Result<Contour, ContourError>
where
    F: Fn(i32, i32) -> bool,
{
    find_contour(&SampledRaster { width, height, sample }, params)
}

/// Traces several rasters of the same domain with a shared saddle policy.
///
/// With the default [`SaddleMemory`], tracing a set of region masks that
/// partition the raster yields rings whose shared boundaries coincide vertex
/// for vertex, which is what simplification needs to lock junctions.
#[derive(Debug, Clone, Default)]
pub struct ContourFinder<S = SaddleMemory> {
    resolver: S,
    params: ContourParams,
}

impl ContourFinder<SaddleMemory> {
    pub fn new(params: ContourParams) -> Self {
        Self::with_resolver(SaddleMemory::new(), params)
    }
}

impl<S: SaddleResolver> ContourFinder<S> {
    pub fn with_resolver(resolver: S, params: ContourParams) -> Self {
        Self { resolver, params }
    }

    pub fn params(&self) -> &ContourParams {
        &self.params
    }

    pub fn resolver(&self) -> &S {
        &self.resolver
    }

    pub fn into_resolver(self) -> S {
        self.resolver
    }

    pub fn find<R>(&mut self, raster: &R) -> Result<Contour, ContourError>
    where
        R: BinaryRaster + ?Sized,
    {
        trace(raster, &mut self.resolver, &self.params)
    }

    pub fn find_by<F>(&mut self, width: usize, height: usize, sample: F) -> Result<Contour, ContourError>
    where
        F: Fn(i32, i32) -> bool,
    {
        self.find(&SampledRaster { width, height, sample })
    }
}

/// Trace independent rasters in parallel.
///
/// Every raster gets its own graph and a fixed connected saddle policy, so the
/// result matches calling [`find_contour`] on each one. Output order follows
/// input order; the first error aborts the batch.
pub fn do_concurrent<R>(rasters: &[R], params: &ContourParams) -> Result<Vec<Contour>, ContourError>
where
    R: BinaryRaster + Sync,
{
    use rayon::prelude::*;

    let batch_start = Instant::now();
    let contours = rasters
        .par_iter()
        .map(|raster| find_contour(raster, params))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "[raster-contours] do_concurrent: {} rasters, {} rings in {:?}",
        rasters.len(),
        contours.iter().map(|c| c.rings.len()).sum::<usize>(),
        batch_start.elapsed()
    );

    Ok(contours)
}
