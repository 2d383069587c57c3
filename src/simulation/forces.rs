//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait the integrator drives, plus the two
//! gravity variants this engine supports:
//! - `NewtonianGravity` – direct pairwise inverse-square sum over all bodies
//! - `CentralGravity`   – a single fixed anchor mass at the origin
//!
//! A pair (or a body and the anchor) at exactly zero separation contributes
//! zero acceleration rather than dividing by zero; no NaN or Inf ever
//! propagates out of a force evaluation.

use crate::simulation::states::{NVec2, System};

/// Collection of acceleration terms (gravity, test fields, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }

    /// Total potential energy over all terms
    pub fn potential_energy(&self, sys: &System) -> f64 {
        self.terms.iter().map(|term| term.potential_energy(sys)).sum()
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec2]);

    /// Potential energy contribution of this term; terms that store no
    /// energy (e.g. uniform test fields) keep the default of zero
    fn potential_energy(&self, _sys: &System) -> f64 {
        0.0
    }
}

/// Direct pairwise Newtonian gravity, O(n^2) per evaluation
///
/// For each body i the net acceleration is the sum over all other bodies j of
/// `g * m_j * (x_j - x_i) / |x_j - x_i|^3`. A coincident pair contributes
/// nothing; there is no softening of close encounters.
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            // bi: body i (left side of the pair)
            let xi = sys.bodies[i].x; // position of body i
            let mi = sys.bodies[i].m; // mass of body i

            for j in (i + 1)..n {
                // bj: body j (right side of the pair)
                let xj = sys.bodies[j].x; // position of body j
                let mj = sys.bodies[j].m; // mass of body j

                // r points from i to j: i feels a pull along +r,
                // j feels a pull along -r
                let r = xj - xi;

                // Squared separation |r|^2
                let r2 = r.dot(&r);

                // Coincident pair: defined as zero contribution, skip
                // before the division can produce NaN/Inf
                if r2 == 0.0 {
                    continue;
                }

                // 1 / |r| and 1 / |r|^3
                // (the inverse-square law in vector form is a = r / |r|^3)
                let inv_r = r2.sqrt().recip();
                let inv_r3 = inv_r * inv_r * inv_r;

                // coef = g / |r|^3
                let coef = self.g * inv_r3;

                // Newton's third law: equal and opposite
                // a_i +=  g * m_j * r / |r|^3
                // a_j += -g * m_i * r / |r|^3
                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
    }

    fn potential_energy(&self, sys: &System) -> f64 {
        let n = sys.bodies.len();
        let mut pe = 0.0;

        // Each unordered pair counted once: -g m_i m_j / |r|
        for i in 0..n {
            for j in (i + 1)..n {
                let r = sys.bodies[j].x - sys.bodies[i].x;
                let r2 = r.dot(&r);
                if r2 == 0.0 {
                    continue;
                }
                pe -= self.g * sys.bodies[i].m * sys.bodies[j].m / r2.sqrt();
            }
        }
        pe
    }
}

/// Gravity from a single fixed anchor mass at the origin, O(1) per body
///
/// The restricted variant of the force law: the anchor is an infinite-mass,
/// fixed-frame approximation with no position or velocity state of its own,
/// so it appears only here and never as a body row in the [`System`].
pub struct CentralGravity {
    pub g: f64,    // gravitational constant
    pub mass: f64, // anchor mass (kg)
}

impl Acceleration for CentralGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            let r2 = b.x.dot(&b.x);
            // A body sitting exactly on the anchor feels no pull
            if r2 == 0.0 {
                continue;
            }
            let inv_r = r2.sqrt().recip();
            let inv_r3 = inv_r * inv_r * inv_r;
            // a = -g * M * x / |x|^3, directed toward the origin
            *a -= self.g * self.mass * inv_r3 * b.x;
        }
    }

    fn potential_energy(&self, sys: &System) -> f64 {
        sys.bodies
            .iter()
            .filter(|b| b.x.dot(&b.x) > 0.0)
            .map(|b| -self.g * self.mass * b.m / b.x.norm())
            .sum()
    }
}
