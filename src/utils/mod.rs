mod bounds;
mod logei_helper;
mod misc;

pub use bounds::*;
pub use logei_helper::*;
pub use misc::*;
