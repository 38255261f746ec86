#![allow(clippy::new_without_default, clippy::derive_partial_eq_without_eq)]

pub mod builder;
pub mod config;
pub mod decimate;
pub mod error;
pub mod event;
pub mod graphics;
pub mod sample;
pub mod spline;

pub extern crate bytemuck;
pub extern crate scrawl_curve;

use crate::{
    builder::SplineBuilder,
    event::InkEvent,
    graphics::{CanvasPos, StrokeVertex},
    spline::{Rib, Spline},
};
use scrawl_curve::{Cubic, ToCurve};

pub const DEFAULT_WIDTH: f64 = 1.0;
pub const DEFAULT_SEGMENTS: usize = 30;

/// owns the one builder constructing one stroke. every mutation goes through
/// `&mut self`, so a stroke has exactly one writer for its whole lifetime.
///
/// corrections may keep trickling in after the touch sequence has ended;
/// keep feeding them until the input layer confirms none remain, then call
/// [`finish`](StrokeSession::finish).
#[derive(Debug)]
pub struct StrokeSession<B: SplineBuilder> {
    builder: B,
}

impl<B: SplineBuilder> StrokeSession<B> {
    pub fn new(builder: B) -> StrokeSession<B> {
        StrokeSession { builder }
    }

    pub fn feed(&mut self, event: InkEvent) {
        event.apply_to(&mut self.builder);
    }

    /// the in-progress spline, predicted suffix included. for interactive
    /// preview only
    pub fn preview(&self) -> &Spline {
        self.builder.spline()
    }

    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    /// stop accepting input and hand the spline off. predicted points are
    /// dropped first; a stroke that never accepted a sample produces nothing
    pub fn finish(mut self) -> Option<FinishedStroke> {
        self.builder.clear_predicted();
        let spline = self.builder.into_spline();

        if spline.is_empty() {
            log::debug!("finished a stroke with no samples");
            None
        } else {
            Some(FinishedStroke { spline })
        }
    }
}

/// a completed, immutable stroke. geometry extraction is pure and reentrant,
/// so a finished stroke may be rendered from any thread
#[derive(Debug, Clone)]
pub struct FinishedStroke {
    spline: Spline,
}

impl FinishedStroke {
    pub fn spline(&self) -> &Spline {
        &self.spline
    }

    /// one cubic Bezier per interior segment, fitted through the samples
    pub fn curves(&self, alpha: f64, epsilon: f64) -> Vec<Cubic<CanvasPos>> {
        let locations = self
            .spline
            .points()
            .iter()
            .map(|point| point.location)
            .collect::<Vec<_>>();
        locations.fit(alpha, epsilon)
    }

    /// the fitted curve flattened into a polyline, joints deduplicated
    pub fn flatten(&self, segments: usize, alpha: f64, epsilon: f64) -> Vec<CanvasPos> {
        let mut polyline = Vec::new();
        for curve in self.curves(alpha, epsilon) {
            let skip = usize::from(!polyline.is_empty());
            polyline.extend(curve.flatten(segments).into_iter().skip(skip));
        }
        polyline
    }

    /// left/right offset points at a fixed width, one rib per sample
    pub fn ribs(&self, width: f64) -> Vec<Rib> {
        self.spline.iter().map(|point| point.rib(width)).collect()
    }

    /// left/right offset points scaled by each sample's force
    pub fn weighted_ribs(&self, width: f64) -> Vec<Rib> {
        self.spline
            .iter()
            .map(|point| point.weighted_rib(width))
            .collect()
    }

    /// the raw centerline, ready for buffering
    pub fn vertices(&self) -> Vec<StrokeVertex> {
        self.spline.points().iter().map(StrokeVertex::from).collect()
    }
}
