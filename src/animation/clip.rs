use crate::animation::binding::AnimationChannel;
use crate::animation::tracks::AnimationSampler;

/// A named set of samplers and the channels that apply them to nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Animation {
    pub name: String,
    samplers: Vec<AnimationSampler>,
    channels: Vec<AnimationChannel>,
}

impl Animation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_sampler(&mut self, sampler: AnimationSampler) -> usize {
        self.samplers.push(sampler);
        self.samplers.len() - 1
    }

    #[must_use]
    pub fn num_samplers(&self) -> usize {
        self.samplers.len()
    }

    #[must_use]
    pub fn sampler(&self, index: usize) -> Option<&AnimationSampler> {
        self.samplers.get(index)
    }

    pub fn add_channel(&mut self, channel: AnimationChannel) -> usize {
        self.channels.push(channel);
        self.channels.len() - 1
    }

    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn channel(&self, index: usize) -> Option<&AnimationChannel> {
        self.channels.get(index)
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut AnimationChannel> {
        self.channels.get_mut(index)
    }

    pub fn channels(&self) -> &[AnimationChannel] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [AnimationChannel] {
        &mut self.channels
    }

    /// Longest sampler duration.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.samplers
            .iter()
            .map(AnimationSampler::duration)
            .fold(0.0_f32, f32::max)
    }
}
