use crate::{
    builder::{EstimationId, SplineBuilder},
    sample::Sample,
};

/// the ingress contract with the input-capture layer, delivered in real-time
/// arrival order, single threaded per stroke
#[derive(Debug, Clone)]
pub enum InkEvent {
    Confirmed(Sample),
    Predicted(Vec<Sample>),
    EstimatedNew(Sample, EstimationId),
    EstimatedUpdate(Sample, EstimationId),
    EstimatedFinal(Sample, EstimationId),
}

impl InkEvent {
    pub fn apply_to<B: SplineBuilder>(self, builder: &mut B) {
        match self {
            InkEvent::Confirmed(sample) => builder.add_confirmed(sample),
            InkEvent::Predicted(samples) => builder.add_predicted(samples),
            InkEvent::EstimatedNew(sample, id) => builder.add_estimated(sample, id),
            InkEvent::EstimatedUpdate(sample, id) => builder.update_estimated(sample, id),
            InkEvent::EstimatedFinal(sample, id) => builder.update_final(sample, id),
        }
    }
}
