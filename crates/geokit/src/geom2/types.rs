//! Tolerances and knobs shared by the 2D polygon routines.
//!
//! - `GeomCfg`: centralizes epsilons and iteration caps.
//! - `Contact`: how zero-separation contact (shared edge or vertex) is classified.
//!
//! Code cross-refs: `gjk::intersects_convex_with`, `sat::intersects_with`,
//! `triangulate::triangulate_with`, `rand::random_concave_polygon_with`

/// Classification of touching polygons (zero-measure overlap).
///
/// GJK, SAT and external libraries disagree exactly at contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Contact {
    /// Each test classifies contact its own way: SAT counts touching intervals
    /// as overlap, GJK mostly reports contact as no intersection (see `gjk`).
    #[default]
    Native,
    /// Separation up to `GeomCfg::eps_contact` is an intersection in both tests.
    Inclusive,
}

/// Geometry configuration (tolerances and caps).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Twice-area threshold under which a vertex triple counts as collinear.
    pub eps_area: f64,
    /// Contact margin used by `Contact::Inclusive`.
    pub eps_contact: f64,
    pub contact: Contact,
    /// GJK iteration cap; exhausting it reports "no intersection".
    pub max_gjk_iterations: usize,
    /// Attempts made by the concave generator before giving up.
    pub max_concave_attempts: usize,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_area: 1e-12,
            eps_contact: 1e-9,
            contact: Contact::Native,
            max_gjk_iterations: 64,
            max_concave_attempts: 100,
        }
    }
}

impl GeomCfg {
    #[inline]
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }
}
