use crate::graphics::CanvasPos;
use scrawl_curve::Vec2;

/// the device specific payload of one observed input point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleData {
    /// a plain touch with no pressure information
    Plain,
    /// a touch from a pressure capable digitizer
    Pressure { force: f64 },
    /// a stylus sample, with the pen's attitude
    Stylus {
        force: f64,
        altitude: f64,
        azimuth: f64,
    },
}

/// one timestamped input observation. immutable once constructed; a
/// correction replaces the whole sample at a slot, it never edits fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub location: CanvasPos,
    pub data: SampleData,
}

impl Sample {
    pub fn plain(timestamp: f64, location: CanvasPos) -> Sample {
        Sample {
            timestamp,
            location,
            data: SampleData::Plain,
        }
    }

    pub fn pressure(timestamp: f64, location: CanvasPos, force: f64) -> Sample {
        Sample {
            timestamp,
            location,
            data: SampleData::Pressure { force },
        }
    }

    pub fn stylus(
        timestamp: f64,
        location: CanvasPos,
        force: f64,
        altitude: f64,
        azimuth: f64,
    ) -> Sample {
        Sample {
            timestamp,
            location,
            data: SampleData::Stylus {
                force,
                altitude,
                azimuth,
            },
        }
    }

    /// a force factor for width modulation. a shallow stylus angle reduces
    /// the effective force; a plain touch always counts as 1.
    ///
    /// the value is >= 0 but has no upper bound, callers must not assume it
    /// is normalized
    pub fn force(&self) -> f64 {
        match self.data {
            SampleData::Plain => 1.0,
            SampleData::Pressure { force } => force,
            SampleData::Stylus {
                force, altitude, ..
            } => force * altitude.sin(),
        }
    }
}

/// stateless significance predicates for incoming samples. purely advisory,
/// the caller decides what to do with a rejected sample.
///
/// `ignore_dist_sq` is compared against the quadrance (squared distance), so
/// the configured value must already be squared.
#[derive(Debug, Clone, Copy)]
pub struct SampleFilter {
    pub ignore_dist_sq: f64,
    pub ignore_force: f64,
}

impl SampleFilter {
    pub fn new(ignore_dist_sq: f64, ignore_force: f64) -> SampleFilter {
        SampleFilter {
            ignore_dist_sq,
            ignore_force,
        }
    }

    /// distance gate only: the candidate must have moved further than the
    /// threshold from the previous accepted location
    pub fn accept_location(&self, candidate: &Sample, prev: CanvasPos) -> bool {
        Vec2::between(prev, candidate.location).quadrance() > self.ignore_dist_sq
    }

    /// distance and force gates together. the first sample of a stroke has
    /// no previous sample and never goes through here.
    //
    // historical revisions of this predicate disagree on whether the force
    // gate composes with AND or OR, see DESIGN.md
    pub fn accept(&self, candidate: &Sample, prev: &Sample) -> bool {
        self.accept_location(candidate, prev.location)
            && (candidate.force() - prev.force()).abs() >= self.ignore_force
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn filter() -> SampleFilter {
        SampleFilter::new(0.003, 0.02)
    }

    #[test]
    fn force_derivation_per_device() {
        let at = CanvasPos::new(0., 0.);
        assert_eq!(Sample::plain(0., at).force(), 1.0);
        assert_eq!(Sample::pressure(0., at, 2.5).force(), 2.5);

        let stylus = Sample::stylus(0., at, 2.0, std::f64::consts::FRAC_PI_6, 0.);
        assert!((stylus.force() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn accepted_samples_moved_beyond_the_quadrance_threshold() {
        let prev = Sample::pressure(0., CanvasPos::new(0., 0.), 1.0);

        // 0.05^2 = 0.0025 <= 0.003, too close even though the force moved
        let near = Sample::pressure(0.01, CanvasPos::new(0.05, 0.), 2.0);
        assert!(!filter().accept(&near, &prev));
        assert!(!filter().accept_location(&near, prev.location));

        let far = Sample::pressure(0.01, CanvasPos::new(1., 1.), 2.0);
        assert!(filter().accept(&far, &prev));
        assert!(filter().accept_location(&far, prev.location));
    }

    #[test]
    fn insignificant_force_change_is_rejected() {
        let prev = Sample::pressure(0., CanvasPos::new(0., 0.), 1.0);
        let flat = Sample::pressure(0.01, CanvasPos::new(1., 1.), 1.019);
        assert!(!filter().accept(&flat, &prev));

        // but the location-only gate doesn't care
        assert!(filter().accept_location(&flat, prev.location));
    }

    #[test]
    fn threshold_is_exclusive() {
        let filter = SampleFilter::new(4.0, 0.0);
        let prev = Sample::plain(0., CanvasPos::new(0., 0.));
        let on_threshold = Sample::plain(0.01, CanvasPos::new(2., 0.));
        let past = Sample::plain(0.01, CanvasPos::new(2.001, 0.));

        assert!(!filter.accept_location(&on_threshold, prev.location));
        assert!(filter.accept_location(&past, prev.location));
    }
}
