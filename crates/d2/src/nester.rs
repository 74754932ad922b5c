//! Greedy NFP strip packer.
//!
//! Each strip is seeded with the largest remaining item at the origin. Every
//! other item orbits the strip's merged footprint, takes the leftmost NFP
//! vertex that keeps it inside the strip, and is merged into the footprint.
//! Items that find no position are carried over to the next strip.

use crate::nfp::no_fit_polygon;
use crate::point::{fuzzy_equal, Point};
use crate::polygon::{Polygon, Rect};
use rayon::prelude::*;
use stripnest_core::{
    Config, Error, ItemOrder, NestEvent, NestReport, PauseToken, Placement, Result, Solver,
};

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Strip packing solver.
///
/// Clones share the same [`PauseToken`].
#[derive(Debug, Clone)]
pub struct StripNester {
    config: Config,
    pause: PauseToken,
}

/// An input item ready for packing.
#[derive(Debug, Clone)]
struct Prepared {
    /// Position in the caller's input.
    index: usize,
    /// Outline handed back in `ItemPlaced`.
    outline: Polygon,
    /// Outline grown by half the item gap; used for NFPs and the footprint.
    shape: Polygon,
}

impl Prepared {
    fn area(&self) -> f64 {
        self.outline.abs_area()
    }
}

impl StripNester {
    /// Creates a new nester with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pause: PauseToken::new(),
        }
    }

    /// Creates a nester with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// The configuration runs use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Token checked before each placement; pausing it stalls running jobs.
    pub fn pause_token(&self) -> PauseToken {
        self.pause.clone()
    }

    /// Packs `polygons` on a background thread.
    ///
    /// The polygons are moved into the worker. Events arrive on the returned
    /// handle in run order.
    pub fn start(&self, polygons: Vec<Polygon>) -> Result<NestHandle> {
        self.config.validate()?;

        let (tx, rx) = mpsc::channel();
        let nester = self.clone();
        let worker = thread::Builder::new()
            .name("stripnest-worker".to_owned())
            .spawn(move || {
                nester.solve_with_events(&polygons, &mut |event| {
                    // a dropped receiver only means nobody is listening
                    let _ = tx.send(event);
                })
            })
            .map_err(|e| Error::WorkerFailed(e.to_string()))?;

        Ok(NestHandle {
            events: rx,
            pause: self.pause.clone(),
            worker,
        })
    }

    /// Applies rotation and gap to every item. Items that can never fit an
    /// empty strip are split off by input index.
    fn prepare(&self, items: &[Polygon]) -> (Vec<Prepared>, Vec<usize>) {
        let prepared: Vec<Prepared> = items
            .par_iter()
            .enumerate()
            .map(|(index, item)| {
                let mut outline = Polygon::new(item.vertices().to_vec());
                if outline.is_valid() {
                    outline.set_anticlockwise();
                    if self.config.allow_rotation {
                        outline.rotate_to_min_bounds();
                    }
                }
                let shape = if self.config.item_gap > 0.0 {
                    outline.offset(self.config.item_gap / 2.0)
                } else {
                    outline.clone()
                };
                Prepared {
                    index,
                    outline,
                    shape,
                }
            })
            .collect();

        let (placeable, rejected): (Vec<_>, Vec<_>) = prepared
            .into_iter()
            .partition(|p| self.is_placeable(&p.shape));

        let unplaced = rejected
            .into_iter()
            .map(|p| {
                log::warn!(
                    "item {} cannot be placed: {} vertices, {:.3} x {:.3} in a {} x {} strip",
                    p.index,
                    p.shape.len(),
                    p.shape.width(),
                    p.shape.height(),
                    self.config.strip_width,
                    self.config.strip_height
                );
                p.index
            })
            .collect();

        (placeable, unplaced)
    }

    fn is_placeable(&self, shape: &Polygon) -> bool {
        shape.is_valid()
            && !fuzzy_equal(shape.area(), 0.0)
            && Rect::new(0.0, 0.0, shape.width(), shape.height())
                .fits_within(self.config.strip_width, self.config.strip_height)
    }

    /// Offset of `shape` at the leftmost vertex of its outer NFP around
    /// `footprint` that keeps it inside the strip.
    fn leftmost_fit(&self, footprint: &Polygon, shape: &Polygon) -> Option<Point> {
        let nfp = no_fit_polygon(footprint, shape, false, false).into_first()?;
        let reference = shape.vertices()[0];
        let bounds = shape.bounds();

        let mut best: Option<(f64, Point)> = None;
        for &v in nfp.vertices() {
            let offset = v - reference;
            let placed = bounds.translated(offset.x, offset.y);
            if !placed.fits_within(self.config.strip_width, self.config.strip_height) {
                continue;
            }
            if best.map_or(true, |(left, _)| placed.x < left) {
                best = Some((placed.x, offset));
            }
        }
        best.map(|(_, offset)| offset)
    }

    /// Fills one strip from `remaining` and returns the items it could not
    /// take.
    fn fill_strip(
        &self,
        strip_id: usize,
        remaining: Vec<Prepared>,
        report: &mut NestReport,
        sink: &mut dyn FnMut(NestEvent<Polygon>),
    ) -> Vec<Prepared> {
        let mut items = remaining.into_iter();
        let Some(seed) = items.next() else {
            return Vec::new();
        };

        let origin = seed.shape.bounds();
        let placement = Placement::new(-origin.x, -origin.y).with_strip(strip_id);
        let mut footprint = seed.shape.clone().with_placement(placement).to_placed();
        commit(&seed, placement, report, sink);

        let mut deferred = Vec::new();
        for item in items {
            self.pause.wait_while_paused();

            let Some(offset) = self.leftmost_fit(&footprint, &item.shape) else {
                log::debug!("item {} does not fit strip {}", item.index, strip_id);
                deferred.push(item);
                continue;
            };

            let placement = Placement::new(offset.x, offset.y).with_strip(strip_id);
            let mut placed = item.shape.clone().with_placement(placement).to_placed();
            if placed.is_anticlockwise() != footprint.is_anticlockwise() {
                placed.reverse();
            }

            match footprint.united(&placed) {
                Some(merged) => {
                    footprint = merged;
                    commit(&item, placement, report, sink);
                }
                None => {
                    log::error!(
                        "item {} touches the footprint of strip {} but could not be merged",
                        item.index,
                        strip_id
                    );
                    report.merge_failures += 1;
                    deferred.push(item);
                }
            }
        }

        deferred
    }
}

/// Records a placed item and announces it.
fn commit(
    item: &Prepared,
    placement: Placement,
    report: &mut NestReport,
    sink: &mut dyn FnMut(NestEvent<Polygon>),
) {
    let strip_id = placement.strip_id.unwrap_or_default();
    report.record_item(strip_id, item.area());
    log::debug!(
        "placed item {} on strip {} at ({:.3}, {:.3})",
        item.index,
        strip_id,
        placement.dx,
        placement.dy
    );
    sink(NestEvent::ItemPlaced {
        item: item.outline.clone().with_placement(placement),
        strip_id,
    });
}

/// Stable sort; equal keys keep input order.
fn sort_items(items: &mut [Prepared], order: ItemOrder) {
    match order {
        ItemOrder::AreaDecreasing => items.sort_by(|a, b| b.area().total_cmp(&a.area())),
        ItemOrder::WidthDecreasing => {
            items.sort_by(|a, b| b.shape.width().total_cmp(&a.shape.width()))
        }
    }
}

impl Solver for StripNester {
    type Item = Polygon;

    fn solve_with_events(
        &self,
        items: &[Polygon],
        sink: &mut dyn FnMut(NestEvent<Polygon>),
    ) -> Result<NestReport> {
        self.config.validate()?;
        let start = Instant::now();

        let mut report = NestReport::new(self.config.strip_area());
        let (mut remaining, unplaced) = self.prepare(items);
        report.unplaced = unplaced;

        log::info!(
            "packing {} items into {} x {} strips",
            remaining.len(),
            self.config.strip_width,
            self.config.strip_height
        );

        while !remaining.is_empty() {
            sort_items(&mut remaining, self.config.order);

            let strip_id = report.open_strip();
            log::info!("opened strip {} with {} items left", strip_id, remaining.len());
            sink(NestEvent::StripOpened { strip_id });

            remaining = self.fill_strip(strip_id, remaining, &mut report, sink);
        }

        report.computation_time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "packing complete: {} items on {} strips, {:.1}% utilization",
            report.placed_count(),
            report.strips_used(),
            report.overall_utilization() * 100.0
        );
        sink(NestEvent::RunComplete);

        Ok(report)
    }
}

// ============================================================================
// Background runs
// ============================================================================

/// A packing run on its own thread.
///
/// There is no cancel: a run always proceeds to completion. Pausing stalls
/// it between placements.
#[derive(Debug)]
pub struct NestHandle {
    events: Receiver<NestEvent<Polygon>>,
    pause: PauseToken,
    worker: JoinHandle<Result<NestReport>>,
}

impl NestHandle {
    /// Stalls the run before its next placement.
    pub fn pause(&self) {
        self.pause.pause();
    }

    /// Lets a paused run continue.
    pub fn resume(&self) {
        self.pause.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Blocks for the next event. `None` once the run has finished and
    /// every event has been received.
    pub fn next_event(&self) -> Option<NestEvent<Polygon>> {
        self.events.recv().ok()
    }

    /// Like [`next_event`](Self::next_event) but gives up after `timeout`.
    pub fn next_event_timeout(&self, timeout: Duration) -> Option<NestEvent<Polygon>> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Returns an event if one is already waiting.
    pub fn try_next_event(&self) -> Option<NestEvent<Polygon>> {
        self.events.try_recv().ok()
    }

    /// Blocking iterator over the remaining events.
    pub fn events(&self) -> impl Iterator<Item = NestEvent<Polygon>> + '_ {
        self.events.iter()
    }

    /// Returns true once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the run to finish and returns its report.
    ///
    /// A paused run is resumed first so the wait can end.
    pub fn join(self) -> Result<NestReport> {
        self.pause.resume();
        self.worker
            .join()
            .map_err(|_| Error::WorkerFailed("packing worker panicked".to_owned()))?
    }
}
