mod follower;
mod steering;

pub use follower::{FollowerConfig, PursuitFollower};
pub use steering::{steering_vector, waypoint_parameter};
