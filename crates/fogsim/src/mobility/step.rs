//! Step user mobility model.

use crate::mobility::UserMobilityModel;

/// Piecewise-constant user population.
///
/// The profile is a sequence of `(duration, num_users)` segments; the model
/// cycles over the profile when it is exhausted. For instance, the profile
/// `[(10, 5), (10, 9)]` yields 5 users for the first 10 steps, 9 users for
/// the next 10 steps, then 5 users again, and so on.
pub struct StepMobility {
    profile: Vec<(usize, usize)>,
    period: usize,
    step: usize,
}

impl StepMobility {
    pub fn new(profile: Vec<(usize, usize)>) -> Self {
        let period = profile.iter().map(|(duration, _)| duration).sum();
        assert!(period > 0, "step mobility profile must cover at least one step");
        Self {
            profile,
            period,
            step: 0,
        }
    }
}

impl UserMobilityModel for StepMobility {
    fn next(&mut self) -> usize {
        let mut pos = self.step % self.period;
        self.step += 1;
        for &(duration, num_users) in &self.profile {
            if pos < duration {
                return num_users;
            }
            pos -= duration;
        }
        unreachable!("position {} exceeds profile period {}", pos, self.period)
    }
}
