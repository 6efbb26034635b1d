pub mod effect;
pub mod keyframe;
pub mod layer;
pub mod project;
pub mod report;
pub mod transition;
