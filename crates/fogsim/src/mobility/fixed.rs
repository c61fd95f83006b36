//! Fixed user mobility model.

use crate::mobility::UserMobilityModel;

/// The simplest mobility model, the user population never changes.
pub struct FixedMobility {
    num_users: usize,
}

impl FixedMobility {
    pub fn new(num_users: usize) -> Self {
        Self { num_users }
    }
}

impl UserMobilityModel for FixedMobility {
    fn next(&mut self) -> usize {
        self.num_users
    }
}
