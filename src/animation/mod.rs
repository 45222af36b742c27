pub mod binding;
pub mod clip;
pub mod tracks;

pub use binding::{AnimationChannel, TargetPath};
pub use clip::Animation;
pub use tracks::{AnimationSampler, InterpolationMode};
