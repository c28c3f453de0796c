//! Particle network simulation

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Particle {
    pub fn random(width: f64, height: f64, mut rand: impl FnMut() -> f64) -> Self {
        Self {
            x: rand() * width,
            y: rand() * height,
            vx: (rand() - 0.5) * PARTICLE_SPEED_MAX * 2.0,
            vy: (rand() - 0.5) * PARTICLE_SPEED_MAX * 2.0,
            radius: PARTICLE_RADIUS_MIN + rand() * PARTICLE_RADIUS_SPAN,
        }
    }

    /// Moves one velocity step, then reverses any axis that is outside the
    /// surface and still heading away from it. Positions are not clamped.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if (self.x < 0.0 && self.vx < 0.0) || (self.x > width && self.vx > 0.0) {
            self.vx = -self.vx;
        }
        if (self.y < 0.0 && self.vy < 0.0) || (self.y > height && self.vy > 0.0) {
            self.vy = -self.vy;
        }
    }
}

/// Line between two particles, derived per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub alpha: f64,
}

/// Opacity for a connector of length `distance`, or `None` past `threshold`.
pub fn connector_alpha(distance: f64, threshold: f64) -> Option<f64> {
    if distance < threshold {
        Some((CONNECTION_MAX_ALPHA * (1.0 - distance / threshold)).max(0.0))
    } else {
        None
    }
}

/// Fixed set of particles bouncing around a `width` x `height` surface.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    connection_distance: f64,
}

impl ParticleField {
    pub fn new(
        count: usize,
        width: f64,
        height: f64,
        connection_distance: f64,
        mut rand: impl FnMut() -> f64,
    ) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(width, height, &mut rand))
            .collect();
        Self::from_particles(particles, width, height, connection_distance)
    }

    pub fn from_particles(
        particles: Vec<Particle>,
        width: f64,
        height: f64,
        connection_distance: f64,
    ) -> Self {
        Self {
            particles,
            width,
            height,
            connection_distance,
        }
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    /// Changes the surface bounds. Existing positions are kept as is.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Every unordered pair closer than the connection distance.
    ///
    /// This is a plain pairwise scan, O(n²). It is fine for the default
    /// population; a uniform grid keyed by the connection distance is the
    /// way forward if counts grow into the thousands.
    pub fn connectors(&self) -> impl Iterator<Item = Connector> + '_ {
        let threshold = self.connection_distance;
        self.particles.iter().enumerate().flat_map(move |(a, p)| {
            self.particles[a + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, q)| {
                    let distance = (p.x - q.x).hypot(p.y - q.y);
                    connector_alpha(distance, threshold).map(|alpha| Connector {
                        a,
                        b: a + 1 + offset,
                        distance,
                        alpha,
                    })
                })
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn connection_distance(&self) -> f64 {
        self.connection_distance
    }

    pub fn set_connection_distance(&mut self, distance: f64) {
        self.connection_distance = distance.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 1.0,
        }
    }

    /// Small LCG so fields are reproducible without a rand dependency.
    fn lcg(seed: u64) -> impl FnMut() -> f64 {
        let mut state = seed;
        move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn random_particles_respect_ranges() {
        let field = ParticleField::new(80, 1920.0, 1080.0, 150.0, lcg(7));
        assert_eq!(field.len(), 80);
        for p in field.particles() {
            assert!((0.0..1920.0).contains(&p.x));
            assert!((0.0..1080.0).contains(&p.y));
            assert!(p.vx.abs() <= PARTICLE_SPEED_MAX);
            assert!(p.vy.abs() <= PARTICLE_SPEED_MAX);
            assert!((1.0..3.0).contains(&p.radius));
        }
    }

    #[test]
    fn population_is_constant_across_frames() {
        let mut field = ParticleField::new(80, 640.0, 480.0, 150.0, lcg(42));
        for _ in 0..1_000 {
            field.step();
            assert_eq!(field.len(), 80);
        }
    }

    #[test]
    fn velocity_sign_changes_only_on_boundary_crossing() {
        let mut field = ParticleField::new(80, 300.0, 200.0, 150.0, lcg(3));
        for _ in 0..2_000 {
            let before: Vec<Particle> = field.particles().to_vec();
            field.step();
            for (old, new) in before.iter().zip(field.particles()) {
                if new.vx != old.vx {
                    assert!(new.x < 0.0 || new.x > 300.0);
                    assert_eq!(new.vx, -old.vx);
                }
                if new.vy != old.vy {
                    assert!(new.y < 0.0 || new.y > 200.0);
                    assert_eq!(new.vy, -old.vy);
                }
            }
        }
    }

    #[test]
    fn overshoot_is_at_most_one_step() {
        let mut field = ParticleField::new(80, 300.0, 200.0, 150.0, lcg(11));
        for _ in 0..5_000 {
            field.step();
            for p in field.particles() {
                assert!(p.x >= -PARTICLE_SPEED_MAX && p.x <= 300.0 + PARTICLE_SPEED_MAX);
                assert!(p.y >= -PARTICLE_SPEED_MAX && p.y <= 200.0 + PARTICLE_SPEED_MAX);
            }
        }
    }

    #[test]
    fn crossing_the_right_edge_reflects() {
        let mut field =
            ParticleField::from_particles(vec![particle(99.9, 50.0, 0.2, 0.0)], 100.0, 100.0, 150.0);
        field.step();
        let p = field.particles()[0];
        assert!(p.x > 100.0);
        assert_eq!(p.vx, -0.2);
        field.step();
        assert!(field.particles()[0].x < p.x);
    }

    #[test]
    fn connector_alpha_falls_linearly() {
        assert_eq!(connector_alpha(0.0, 150.0), Some(0.2));
        let mid = connector_alpha(75.0, 150.0).unwrap();
        assert!((mid - 0.1).abs() < 1e-12);
        assert_eq!(connector_alpha(150.0, 150.0), None);
        assert_eq!(connector_alpha(400.0, 150.0), None);
    }

    #[test]
    fn connectors_follow_distance_threshold() {
        let field = ParticleField::from_particles(
            vec![
                particle(0.0, 0.0, 0.0, 0.0),
                particle(60.0, 80.0, 0.0, 0.0),
                particle(300.0, 0.0, 0.0, 0.0),
                particle(300.0, 149.0, 0.0, 0.0),
            ],
            500.0,
            500.0,
            150.0,
        );
        let connectors: Vec<Connector> = field.connectors().collect();
        let pairs: Vec<(usize, usize)> = connectors.iter().map(|c| (c.a, c.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (2, 3)]);

        assert_eq!(connectors[0].distance, 100.0);
        assert_eq!(connectors[1].distance, 149.0);
    }

    #[test]
    fn exactly_threshold_is_not_connected() {
        let field = ParticleField::from_particles(
            vec![particle(0.0, 0.0, 0.0, 0.0), particle(150.0, 0.0, 0.0, 0.0)],
            500.0,
            500.0,
            150.0,
        );
        assert_eq!(field.connectors().count(), 0);
    }

    #[test]
    fn connector_alpha_matches_distance() {
        let field = ParticleField::from_particles(
            vec![particle(0.0, 0.0, 0.0, 0.0), particle(30.0, 40.0, 0.0, 0.0)],
            500.0,
            500.0,
            150.0,
        );
        let c = field.connectors().next().unwrap();
        assert_eq!(c.distance, 50.0);
        assert!((c.alpha - 0.2 * (1.0 - 50.0 / 150.0)).abs() < 1e-12);
    }

    #[test]
    fn resize_keeps_positions_and_reflects_strays_back() {
        let mut field =
            ParticleField::from_particles(vec![particle(800.0, 100.0, 0.2, 0.0)], 1000.0, 500.0, 150.0);
        field.resize(400.0, 500.0);
        assert_eq!(field.particles()[0].x, 800.0);
        assert_eq!(field.size(), (400.0, 500.0));

        field.step();
        assert_eq!(field.particles()[0].vx, -0.2);

        let mut frames = 1;
        while field.particles()[0].x > 400.0 {
            field.step();
            frames += 1;
            assert_eq!(field.particles()[0].vx, -0.2);
            assert!(frames < 5_000, "stray never came back");
        }
        assert!(field.particles()[0].x <= 400.0);
    }

    #[test]
    fn stray_below_zero_heads_back_in() {
        let mut field =
            ParticleField::from_particles(vec![particle(-30.0, -30.0, -0.1, 0.1)], 100.0, 100.0, 150.0);
        for _ in 0..1_000 {
            field.step();
        }
        let p = field.particles()[0];
        assert_eq!((p.vx, p.vy), (0.1, 0.1));
        assert!(p.x >= 0.0 && p.y >= 0.0);
    }
}
