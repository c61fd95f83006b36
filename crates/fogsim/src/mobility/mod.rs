//! User mobility models.

mod fixed;
mod random_waypoint;
mod step;

pub use fixed::FixedMobility;
pub use random_waypoint::RandomWaypointMobility;
pub use step::StepMobility;

/// Trait for implementation of user mobility models.
///
/// A mobility model produces the number of active users per discrete time
/// step, which the experiment turns into the demand seen by the allocation
/// solver. Every call to `next` advances the model by exactly one step and
/// has no other side effects; the produced sequence is effectively infinite
/// and restartable only by reconstructing the model.
pub trait UserMobilityModel {
    fn next(&mut self) -> usize;
}
