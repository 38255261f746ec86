use crate::{
    builder::{EstimationId, SplineBuilder},
    sample::Sample,
    spline::Spline,
};
use std::collections::HashSet;

/// intentionally undersamples the stream feeding another builder, by arrival
/// order rather than by distance. every interval-th sample on a channel goes
/// through; confirmed and estimated samples share a channel, predicted
/// samples count on their own.
///
/// estimated samples that were dropped leave their correlation id
/// unregistered, so later corrections for them are ignored instead of being
/// applied to a slot that was never created.
#[derive(Debug)]
pub struct Decimated<B> {
    below: B,
    interval: usize,
    confirmed: usize,
    predicted: usize,
    registered: HashSet<EstimationId>,
}

impl<B> Decimated<B> {
    pub fn new(below: B, interval: usize) -> Decimated<B> {
        assert!(interval > 0, "decimation interval must be at least 1");
        Decimated {
            below,
            interval,
            confirmed: 0,
            predicted: 0,
            registered: HashSet::new(),
        }
    }

    pub fn below(&self) -> &B {
        &self.below
    }
}

impl<B: SplineBuilder> SplineBuilder for Decimated<B> {
    fn add_confirmed(&mut self, sample: Sample) {
        if self.confirmed % self.interval == 0 {
            self.below.add_confirmed(sample);
        }
        self.confirmed += 1;
    }

    fn add_predicted(&mut self, samples: Vec<Sample>) {
        let mut kept = Vec::new();
        for sample in samples {
            if self.predicted % self.interval == 0 {
                kept.push(sample);
            }
            self.predicted += 1;
        }
        // forwarded even when empty so the suffix below is still replaced
        self.below.add_predicted(kept);
    }

    fn clear_predicted(&mut self) {
        self.below.clear_predicted();
    }

    fn add_estimated(&mut self, sample: Sample, id: EstimationId) {
        if self.confirmed % self.interval == 0 {
            self.registered.insert(id);
            self.below.add_estimated(sample, id);
        }
        self.confirmed += 1;
    }

    fn update_estimated(&mut self, sample: Sample, id: EstimationId) {
        if self.registered.contains(&id) {
            self.below.update_estimated(sample, id);
        } else {
            log::debug!("update for decimated-away {id:?}");
        }
    }

    fn update_final(&mut self, sample: Sample, id: EstimationId) {
        if self.registered.contains(&id) {
            self.below.update_final(sample, id);
        } else {
            log::debug!("final update for decimated-away {id:?}");
        }
    }

    fn reset(&mut self) {
        self.below.reset();
        self.confirmed = 0;
        self.predicted = 0;
        self.registered.clear();
    }

    fn spline(&self) -> &Spline {
        self.below.spline()
    }

    fn into_spline(self) -> Spline {
        self.below.into_spline()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{builder::ReconcilingBuilder, graphics::CanvasPos};

    fn sample(t: f64) -> Sample {
        Sample::plain(t, CanvasPos::new(t, 0.))
    }

    fn timestamps(spline: &Spline) -> Vec<f64> {
        spline.points().iter().map(|p| p.timestamp).collect()
    }

    #[test]
    fn forwards_every_third_arrival() {
        let mut builder = Decimated::new(ReconcilingBuilder::new(), 3);
        for t in 0..7 {
            builder.add_confirmed(sample(t as f64));
        }

        assert_eq!(timestamps(builder.spline()), vec![0., 3., 6.]);
    }

    #[test]
    fn estimated_samples_share_the_confirmed_channel() {
        let mut builder = Decimated::new(ReconcilingBuilder::new(), 2);
        builder.add_confirmed(sample(0.));
        builder.add_estimated(sample(1.), EstimationId(1));
        builder.add_confirmed(sample(2.));
        builder.add_estimated(sample(3.), EstimationId(3));

        // arrivals 0 and 2 pass; the estimated sample at arrival 1 is dropped
        assert_eq!(timestamps(builder.spline()), vec![0., 2.]);
    }

    #[test]
    fn updates_for_dropped_ids_are_ignored() {
        let dropped = EstimationId(1);
        let kept = EstimationId(0);
        let mut builder = Decimated::new(ReconcilingBuilder::new(), 2);

        builder.add_estimated(sample(0.), kept);
        builder.add_estimated(sample(1.), dropped);

        builder.update_final(sample(9.), dropped);
        assert_eq!(timestamps(builder.spline()), vec![0.]);

        builder.update_final(sample(5.), kept);
        assert_eq!(timestamps(builder.spline()), vec![5.]);
    }

    #[test]
    fn predicted_channel_counts_independently() {
        let mut builder = Decimated::new(ReconcilingBuilder::new(), 2);
        builder.add_confirmed(sample(0.));

        builder.add_predicted(vec![sample(10.), sample(11.), sample(12.)]);
        // predicted arrivals 0 and 2 pass
        assert_eq!(timestamps(builder.spline()), vec![0., 10., 12.]);

        // the next batch replaces the suffix and keeps counting, arrival 4
        builder.add_predicted(vec![sample(13.), sample(14.)]);
        assert_eq!(timestamps(builder.spline()), vec![0., 14.]);
    }

    #[test]
    fn clear_predicted_passes_through_undecimated() {
        let mut builder = Decimated::new(ReconcilingBuilder::new(), 4);
        builder.add_confirmed(sample(0.));
        builder.add_predicted(vec![sample(1.)]);
        builder.clear_predicted();
        assert_eq!(timestamps(builder.spline()), vec![0.]);
    }
}
