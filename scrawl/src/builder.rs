use crate::{sample::Sample, spline::Spline};
use std::collections::HashMap;

/// the correlation token an input source attaches to an estimated sample so a
/// later correction can find the slot it created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EstimationId(pub u64);

/// how a stroke under construction absorbs the three kinds of updates:
/// confirmed samples, estimated samples with a correlation id, and a
/// speculative predicted suffix that is bulk replaced on every real event.
///
/// one builder builds one stroke; every method takes `&mut self`, so there is
/// exactly one writer per stroke by construction.
pub trait SplineBuilder {
    fn add_confirmed(&mut self, sample: Sample);

    /// replace the predicted suffix with a new batch of speculative samples.
    /// predicted points exist only to hide latency during preview, they are
    /// never assigned a correlation id and never reach finalized geometry
    fn add_predicted(&mut self, samples: Vec<Sample>);

    /// drop the predicted suffix. must run before the spline is handed to
    /// the curve fitter or the width offset engine
    fn clear_predicted(&mut self);

    fn add_estimated(&mut self, sample: Sample, id: EstimationId);

    /// correct an earlier estimated sample. an unknown id is stale, not an
    /// error
    fn update_estimated(&mut self, sample: Sample, id: EstimationId);

    /// final correction: after this the id never matches again
    fn update_final(&mut self, sample: Sample, id: EstimationId);

    /// back to an empty spline, ready for the next stroke
    fn reset(&mut self);

    fn spline(&self) -> &Spline;

    fn into_spline(self) -> Spline
    where
        Self: Sized;
}

/// the reference builder: reconciles estimated samples through a correlation
/// map and keeps the predicted suffix strictly transient
#[derive(Debug, Default)]
pub struct ReconcilingBuilder {
    spline: Spline,
    // maps an id to the slot holding the data for the corresponding touch.
    // an id is present iff its slot may still receive a correction
    estimation_map: HashMap<EstimationId, usize>,
    predicted_len: usize,
}

impl ReconcilingBuilder {
    pub fn new() -> ReconcilingBuilder {
        ReconcilingBuilder::default()
    }

    pub fn predicted_len(&self) -> usize {
        self.predicted_len
    }

    pub fn has_pending_estimates(&self) -> bool {
        !self.estimation_map.is_empty()
    }
}

impl SplineBuilder for ReconcilingBuilder {
    fn add_confirmed(&mut self, sample: Sample) {
        // confirmed data always supersedes prediction
        self.clear_predicted();
        self.spline.append(sample);
    }

    fn add_predicted(&mut self, samples: Vec<Sample>) {
        self.clear_predicted();
        self.predicted_len = samples.len();
        for sample in samples {
            self.spline.append(sample);
        }
    }

    fn clear_predicted(&mut self) {
        self.spline.remove_last(self.predicted_len);
        self.predicted_len = 0;
    }

    fn add_estimated(&mut self, sample: Sample, id: EstimationId) {
        self.clear_predicted();
        let index = self.spline.len();
        self.spline.append(sample);
        self.estimation_map.insert(id, index);
    }

    fn update_estimated(&mut self, sample: Sample, id: EstimationId) {
        self.clear_predicted();
        if let Some(&index) = self.estimation_map.get(&id) {
            self.spline.replace(index, sample);
        } else {
            log::debug!("stale estimated update for {id:?}");
        }
    }

    fn update_final(&mut self, sample: Sample, id: EstimationId) {
        self.clear_predicted();
        if let Some(index) = self.estimation_map.remove(&id) {
            self.spline.replace(index, sample);
        } else {
            log::debug!("stale final update for {id:?}");
        }
    }

    fn reset(&mut self) {
        *self = ReconcilingBuilder::new();
    }

    fn spline(&self) -> &Spline {
        &self.spline
    }

    fn into_spline(self) -> Spline {
        self.spline
    }
}

/// appends everything in arrival order and ignores predictions and
/// corrections entirely. useful when the input source never estimates
#[derive(Debug, Default)]
pub struct RawBuilder {
    spline: Spline,
}

impl RawBuilder {
    pub fn new() -> RawBuilder {
        RawBuilder::default()
    }
}

impl SplineBuilder for RawBuilder {
    fn add_confirmed(&mut self, sample: Sample) {
        self.spline.append(sample);
    }

    fn add_predicted(&mut self, _samples: Vec<Sample>) {}

    fn clear_predicted(&mut self) {}

    fn add_estimated(&mut self, sample: Sample, _id: EstimationId) {
        self.add_confirmed(sample);
    }

    fn update_estimated(&mut self, _sample: Sample, _id: EstimationId) {}

    fn update_final(&mut self, _sample: Sample, _id: EstimationId) {}

    fn reset(&mut self) {
        self.spline = Spline::new();
    }

    fn spline(&self) -> &Spline {
        &self.spline
    }

    fn into_spline(self) -> Spline {
        self.spline
    }
}

/// keeps only the first and the most recent point, for a straight line tool.
/// a predicted endpoint may be shown while the confirmed one is parked
#[derive(Debug, Default)]
pub struct TwoPointBuilder {
    spline: Spline,
    // the confirmed endpoint while the displayed one is speculative. None
    // with the flag set means no confirmed endpoint existed yet
    parked: Option<Sample>,
    endpoint_speculative: bool,
    first_id: Option<EstimationId>,
    last_id: Option<EstimationId>,
}

impl TwoPointBuilder {
    pub fn new() -> TwoPointBuilder {
        TwoPointBuilder::default()
    }

    fn push_endpoint(&mut self, sample: Sample) {
        if self.spline.len() < 2 {
            self.spline.append(sample);
        } else {
            self.spline.replace(1, sample);
        }
    }
}

impl SplineBuilder for TwoPointBuilder {
    fn add_confirmed(&mut self, sample: Sample) {
        // a confirmed endpoint replaces any speculative one outright
        self.parked = None;
        self.endpoint_speculative = false;
        self.push_endpoint(sample);
    }

    fn add_predicted(&mut self, samples: Vec<Sample>) {
        assert!(
            !self.spline.is_empty(),
            "at least one confirmed sample must exist before any predicted samples",
        );

        if let Some(&last) = samples.last() {
            if !self.endpoint_speculative {
                self.parked = self.spline.get(1).copied();
                self.endpoint_speculative = true;
            }
            self.push_endpoint(last);
        }
    }

    fn clear_predicted(&mut self) {
        if self.endpoint_speculative {
            self.endpoint_speculative = false;
            match self.parked.take() {
                Some(sample) => self.push_endpoint(sample),
                None => self.spline.remove_last(1),
            }
        }
    }

    fn add_estimated(&mut self, sample: Sample, id: EstimationId) {
        if self.spline.is_empty() {
            self.first_id = Some(id);
        } else {
            self.last_id = Some(id);
        }
        self.add_confirmed(sample);
    }

    fn update_estimated(&mut self, sample: Sample, id: EstimationId) {
        if self.first_id == Some(id) {
            self.spline.replace(0, sample);
        } else if self.last_id == Some(id) {
            if self.endpoint_speculative {
                // correct the real endpoint, not the displayed speculation
                self.parked = Some(sample);
            } else {
                self.push_endpoint(sample);
            }
        }
    }

    fn update_final(&mut self, sample: Sample, id: EstimationId) {
        self.update_estimated(sample, id);
        if self.first_id == Some(id) {
            self.first_id = None;
        } else if self.last_id == Some(id) {
            self.last_id = None;
        }
    }

    fn reset(&mut self) {
        *self = TwoPointBuilder::new();
    }

    fn spline(&self) -> &Spline {
        &self.spline
    }

    fn into_spline(self) -> Spline {
        self.spline
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graphics::CanvasPos;

    fn sample(t: f64) -> Sample {
        Sample::plain(t, CanvasPos::new(t * 10., 0.))
    }

    fn timestamps(spline: &Spline) -> Vec<f64> {
        spline.points().iter().map(|p| p.timestamp).collect()
    }

    #[test]
    fn confirmed_supersedes_predicted() {
        let mut builder = ReconcilingBuilder::new();
        builder.add_confirmed(sample(0.));
        builder.add_confirmed(sample(1.));
        builder.add_predicted(vec![sample(2.), sample(3.)]);
        assert_eq!(builder.spline().len(), 4);

        builder.add_confirmed(sample(4.));
        assert_eq!(timestamps(builder.spline()), vec![0., 1., 4.]);
        assert_eq!(builder.predicted_len(), 0);
    }

    #[test]
    fn predicted_batches_replace_each_other() {
        let mut builder = ReconcilingBuilder::new();
        builder.add_confirmed(sample(0.));
        builder.add_predicted(vec![sample(1.), sample(2.), sample(3.)]);
        builder.add_predicted(vec![sample(4.)]);
        assert_eq!(timestamps(builder.spline()), vec![0., 4.]);
    }

    #[test]
    fn clear_predicted_is_idempotent() {
        let mut builder = ReconcilingBuilder::new();
        builder.add_confirmed(sample(0.));
        builder.add_predicted(vec![sample(1.), sample(2.)]);

        builder.clear_predicted();
        let after_first = timestamps(builder.spline());
        builder.clear_predicted();
        assert_eq!(timestamps(builder.spline()), after_first);
        assert_eq!(builder.predicted_len(), 0);
    }

    #[test]
    fn estimated_update_final_settles_on_the_last_correction() {
        let id = EstimationId(7);
        let mut builder = ReconcilingBuilder::new();

        builder.add_estimated(sample(0.), id);
        builder.update_estimated(sample(1.), id);
        builder.update_final(sample(2.), id);

        assert_eq!(builder.spline().len(), 1);
        assert_eq!(builder.spline().get(0).unwrap().timestamp, 2.);
        assert!(!builder.has_pending_estimates());

        // terminal: later corrections for the id are no-ops
        builder.update_estimated(sample(3.), id);
        builder.update_final(sample(4.), id);
        assert_eq!(builder.spline().get(0).unwrap().timestamp, 2.);
    }

    #[test]
    fn stale_ids_are_ignored() {
        let mut builder = ReconcilingBuilder::new();
        builder.add_confirmed(sample(0.));
        builder.update_estimated(sample(1.), EstimationId(99));
        builder.update_final(sample(2.), EstimationId(99));
        assert_eq!(timestamps(builder.spline()), vec![0.]);
    }

    #[test]
    fn corrections_land_in_the_right_slot_around_later_points() {
        let id = EstimationId(1);
        let mut builder = ReconcilingBuilder::new();

        builder.add_confirmed(sample(0.));
        builder.add_estimated(sample(1.), id);
        builder.add_confirmed(sample(2.));
        builder.update_final(sample(9.), id);

        assert_eq!(timestamps(builder.spline()), vec![0., 9., 2.]);
    }

    #[test]
    fn predicted_points_never_enter_the_estimation_map() {
        let mut builder = ReconcilingBuilder::new();
        builder.add_confirmed(sample(0.));
        builder.add_predicted(vec![sample(1.), sample(2.)]);
        assert!(!builder.has_pending_estimates());
    }

    #[test]
    fn raw_builder_ignores_speculation() {
        let mut builder = RawBuilder::new();
        builder.add_confirmed(sample(0.));
        builder.add_predicted(vec![sample(1.)]);
        builder.add_estimated(sample(2.), EstimationId(0));
        builder.update_final(sample(3.), EstimationId(0));
        assert_eq!(timestamps(builder.spline()), vec![0., 2.]);
    }

    #[test]
    fn two_point_builder_keeps_first_and_latest() {
        let mut builder = TwoPointBuilder::new();
        builder.add_confirmed(sample(0.));
        builder.add_confirmed(sample(1.));
        builder.add_confirmed(sample(2.));
        assert_eq!(timestamps(builder.spline()), vec![0., 2.]);
    }

    #[test]
    fn two_point_builder_parks_the_confirmed_endpoint() {
        let mut builder = TwoPointBuilder::new();
        builder.add_confirmed(sample(0.));
        builder.add_confirmed(sample(1.));

        builder.add_predicted(vec![sample(8.), sample(9.)]);
        assert_eq!(timestamps(builder.spline()), vec![0., 9.]);

        builder.clear_predicted();
        assert_eq!(timestamps(builder.spline()), vec![0., 1.]);
    }

    #[test]
    fn two_point_builder_drops_a_speculative_only_endpoint() {
        let mut builder = TwoPointBuilder::new();
        builder.add_confirmed(sample(0.));

        builder.add_predicted(vec![sample(9.)]);
        assert_eq!(timestamps(builder.spline()), vec![0., 9.]);

        builder.clear_predicted();
        assert_eq!(timestamps(builder.spline()), vec![0.]);
    }

    #[test]
    fn two_point_builder_tracks_both_estimation_ids() {
        let first = EstimationId(1);
        let last = EstimationId(2);
        let mut builder = TwoPointBuilder::new();

        builder.add_estimated(sample(0.), first);
        builder.add_estimated(sample(1.), last);
        builder.update_final(sample(5.), first);
        builder.update_final(sample(6.), last);
        assert_eq!(timestamps(builder.spline()), vec![5., 6.]);

        builder.update_estimated(sample(7.), last);
        assert_eq!(timestamps(builder.spline()), vec![5., 6.]);
    }
}
