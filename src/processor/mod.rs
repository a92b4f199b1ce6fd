mod cloud;
mod spatial;
mod temporal;

pub use cloud::CloudProjector;
pub use spatial::SpatialFilter;
pub use temporal::TemporalFilter;

use std::marker::PhantomData;

use crate::{
    data::{ColorFrame, DepthFrame},
    Error,
};

pub trait ProcessTrait: Sized {
    fn process<O, P: ProcessorTrait<Self, O>>(self, processor: &P) -> Result<O, Error> {
        processor.process(self).map_err(Error::Processing)
    }
}

impl ProcessTrait for DepthFrame {}
impl ProcessTrait for (DepthFrame, ColorFrame) {}
impl ProcessTrait for (DepthFrame, DepthFrame) {}

pub trait ProcessorTrait<I, O> {
    fn process(&self, input: I) -> Result<O, Box<dyn std::error::Error + Send + Sync>>;

    fn pipe<'a, 'b, T, P>(&'a self, processor: &'b P) -> PipedProcessor<'a, 'b, I, O, T, Self, P>
    where
        Self: Sized,
        P: ProcessorTrait<O, T>,
    {
        PipedProcessor {
            _input: PhantomData,
            _tmp: PhantomData,
            _output: PhantomData,
            processor1: self,
            processor2: processor,
        }
    }
}

pub struct PipedProcessor<'a, 'b, I, T, O, P1, P2>
where
    P1: ProcessorTrait<I, T>,
    P2: ProcessorTrait<T, O>,
{
    _input: PhantomData<I>,
    _tmp: PhantomData<T>,
    _output: PhantomData<O>,
    processor1: &'a P1,
    processor2: &'b P2,
}

impl<'a, 'b, I, T, O, P1, P2> ProcessorTrait<I, O> for PipedProcessor<'a, 'b, I, T, O, P1, P2>
where
    P1: ProcessorTrait<I, T>,
    P2: ProcessorTrait<T, O>,
{
    fn process(&self, input: I) -> Result<O, Box<dyn std::error::Error + Send + Sync>> {
        self.processor2.process(self.processor1.process(input)?)
    }
}

/// Depth noise filter cascade, spatial pass first.
///
/// The cascade itself carries no frame history: the caller owns the
/// previously filtered frame and passes it back in.
#[derive(Clone)]
pub struct FilterConfig {
    pub spatial: Option<SpatialFilter>,
    pub temporal: Option<TemporalFilter>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            spatial: Some(SpatialFilter::default()),
            temporal: Some(TemporalFilter::default()),
        }
    }
}

impl FilterConfig {
    pub fn none() -> Self {
        Self {
            spatial: None,
            temporal: None,
        }
    }

    /// Run the enabled passes over `frame`. `previous` is the frame this
    /// cascade returned for the preceding acquisition, if any.
    pub fn apply(&self, frame: DepthFrame, previous: Option<&DepthFrame>) -> DepthFrame {
        let frame = match &self.spatial {
            Some(filter) => filter.apply(&frame),
            None => frame,
        };

        match &self.temporal {
            Some(filter) => filter.apply(&frame, previous),
            None => frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processors_compose_through_pipe() {
        let coarse = SpatialFilter::default();
        let fine = SpatialFilter {
            magnitude: 1,
            ..SpatialFilter::default()
        };

        let frame = DepthFrame {
            width: 4,
            height: 1,
            buffer: vec![1000, 1010, 1005, 1012],
            sequence: 0,
            timestamp: 0,
        };

        let piped = coarse.pipe(&fine);
        let output = piped.process(frame.clone()).unwrap();
        let expected = fine.apply(&coarse.apply(&frame));

        assert_eq!(output, expected);
    }

    #[test]
    fn disabled_cascade_passes_frames_through() {
        let frame = DepthFrame {
            width: 2,
            height: 1,
            buffer: vec![800, 900],
            sequence: 7,
            timestamp: 0,
        };

        let filtered = FilterConfig::none().apply(frame.clone(), None);

        assert_eq!(filtered, frame);
    }
}
