//! Random waypoint user mobility model.
//!
//! REFERENCES:
//! - Mao, Shiwen (2010). "Fundamentals of Communication Networks".
//!   Cognitive Radio Communications and Networks. pp. 201-234.
//!   [doi:10.1016/B978-0-12-374715-0.00008-3]

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::mobility::UserMobilityModel;

struct Node {
    x: f64,
    y: f64,
    waypoint: (f64, f64),
    velocity: f64,
    wait: f64,
}

/// Rectangle covered by the fog node, 10% of each dimension centered in the
/// simulation area.
struct FogArea {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl FogArea {
    fn new(max_x: f64, max_y: f64) -> Self {
        let x_len = 0.1 * max_x;
        let y_len = 0.1 * max_y;
        Self {
            x_min: max_x / 2. - x_len / 2.,
            x_max: max_x / 2. + x_len / 2.,
            y_min: max_y / 2. - y_len / 2.,
            y_max: max_y / 2. + y_len / 2.,
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// Random waypoint mobility model.
///
/// `num_nodes` users move inside a `max_x` x `max_y` area: each node travels
/// in a straight line toward a uniformly drawn waypoint at a uniformly drawn
/// speed in `[min_v, max_v]` and pauses up to `max_wt` time units upon
/// arrival. Every call to `next` advances all nodes by one time unit and
/// returns the number of nodes currently located inside the fog node area.
pub struct RandomWaypointMobility {
    nodes: Vec<Node>,
    fog_area: FogArea,
    max_x: f64,
    max_y: f64,
    min_v: f64,
    max_v: f64,
    max_wt: f64,
    rng: Pcg64,
}

impl RandomWaypointMobility {
    pub const DEFAULT_MIN_V: f64 = 10.;
    pub const DEFAULT_MAX_V: f64 = 100.;
    pub const DEFAULT_MAX_WT: f64 = 0.;
    pub const DEFAULT_SEED: u64 = 0xffff;

    pub fn new(num_nodes: usize, max_x: f64, max_y: f64) -> Self {
        Self::with_params(
            num_nodes,
            max_x,
            max_y,
            Self::DEFAULT_MIN_V,
            Self::DEFAULT_MAX_V,
            Self::DEFAULT_MAX_WT,
            Self::DEFAULT_SEED,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_params(
        num_nodes: usize,
        max_x: f64,
        max_y: f64,
        min_v: f64,
        max_v: f64,
        max_wt: f64,
        seed: u64,
    ) -> Self {
        assert!(max_x > 0. && max_y > 0., "simulation area must not be empty");
        assert!(
            min_v > 0. && max_v >= min_v,
            "node velocities must satisfy 0 < min_v <= max_v"
        );
        assert!(max_wt >= 0., "max waiting time must be non-negative");
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut nodes = Vec::with_capacity(num_nodes);
        for _ in 0..num_nodes {
            nodes.push(Node {
                x: rng.gen_range(0.0..max_x),
                y: rng.gen_range(0.0..max_y),
                waypoint: (rng.gen_range(0.0..max_x), rng.gen_range(0.0..max_y)),
                velocity: rng.gen_range(min_v..=max_v),
                wait: 0.,
            });
        }
        Self {
            nodes,
            fog_area: FogArea::new(max_x, max_y),
            max_x,
            max_y,
            min_v,
            max_v,
            max_wt,
            rng,
        }
    }
}

impl UserMobilityModel for RandomWaypointMobility {
    fn next(&mut self) -> usize {
        for node in &mut self.nodes {
            if node.wait > 0. {
                node.wait = (node.wait - 1.).max(0.);
                continue;
            }
            let dx = node.waypoint.0 - node.x;
            let dy = node.waypoint.1 - node.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= node.velocity {
                // Waypoint reached within this step: pause there, then draw a
                // new waypoint and velocity.
                node.x = node.waypoint.0;
                node.y = node.waypoint.1;
                if self.max_wt > 0. {
                    node.wait = self.rng.gen_range(0.0..self.max_wt);
                }
                node.waypoint = (
                    self.rng.gen_range(0.0..self.max_x),
                    self.rng.gen_range(0.0..self.max_y),
                );
                node.velocity = self.rng.gen_range(self.min_v..=self.max_v);
            } else {
                node.x += dx / dist * node.velocity;
                node.y += dy / dist * node.velocity;
            }
        }
        self.nodes
            .iter()
            .filter(|node| self.fog_area.contains(node.x, node.y))
            .count()
    }
}
