mod bezier;
mod obstacle;

pub use bezier::{
    effective_resolution, influence_of, sample_count, sample_parameters, ControlPoint,
    CubicBezier, Influence,
};
pub use obstacle::Polygon;
