use super::constants::{ARC_LENGTH_DIVISIONS, TUBE_HEIGHT};
use super::error::SceneError;
use glam::Vec3;

/// Named motion curves shared by the static tubes and the moving pulses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathName {
    FactoryToSilo,
    SiloToWarehouse,
    WarehouseToFactory,
}

impl PathName {
    pub const ALL: [PathName; 3] = [
        PathName::FactoryToSilo,
        PathName::SiloToWarehouse,
        PathName::WarehouseToFactory,
    ];

    /// Hand-authored control points for the factory layout (x, fixed y, z).
    pub fn control_points(self) -> Vec<Vec3> {
        let y = TUBE_HEIGHT;
        match self {
            PathName::FactoryToSilo => vec![
                Vec3::new(-4.0, y, -3.0),
                Vec3::new(-1.5, y, -3.0),
                Vec3::new(0.5, y, -1.0),
                Vec3::new(3.5, y, -1.0),
            ],
            PathName::SiloToWarehouse => vec![
                Vec3::new(3.5, y, -1.0),
                Vec3::new(4.0, y, 2.0),
                Vec3::new(1.0, y, 4.0),
            ],
            PathName::WarehouseToFactory => vec![
                Vec3::new(1.0, y, 4.0),
                Vec3::new(-2.5, y, 3.5),
                Vec3::new(-4.5, y, 1.0),
                Vec3::new(-4.0, y, -3.0),
            ],
        }
    }
}

// One cubic per axis, evaluated as c0 + c1 t + c2 t^2 + c3 t^3.
#[derive(Clone, Copy, Debug)]
struct Cubic {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl Cubic {
    #[inline]
    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }

    #[inline]
    fn derivative(&self, t: f32) -> Vec3 {
        self.c1 + self.c2 * (2.0 * t) + self.c3 * (3.0 * t * t)
    }
}

/// Smooth open curve through an ordered list of control points.
///
/// Centripetal Catmull-Rom segments with extrapolated end points. The curve is
/// parameterized by arc length: a cumulative length table is built once, so
/// [`Path::point_at`] is a binary search plus one cubic evaluation.
#[derive(Clone, Debug)]
pub struct Path {
    points: Vec<Vec3>,
    segments: Vec<Cubic>,
    arc_lengths: Vec<f32>,
}

impl Path {
    pub fn new(points: Vec<Vec3>) -> Result<Self, SceneError> {
        if points.len() < 2 {
            return Err(SceneError::TooFewControlPoints(points.len()));
        }
        let segments = (0..points.len() - 1)
            .map(|i| centripetal_segment(&points, i))
            .collect::<Vec<_>>();
        let mut path = Self {
            points,
            segments,
            arc_lengths: Vec::new(),
        };
        path.arc_lengths = path.build_arc_lengths(ARC_LENGTH_DIVISIONS);
        Ok(path)
    }

    pub fn named(name: PathName) -> Result<Self, SceneError> {
        Self::new(name.control_points())
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at fraction `u` of the curve's length. `u` is clamped to [0, 1].
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at fraction `u` of the curve's length.
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        let (seg, local) = self.locate(self.u_to_t(u));
        let d = self.segments[seg].derivative(local);
        if d.length_squared() > 1e-12 {
            return d.normalize();
        }
        // Degenerate derivative (coincident points): fall back to the chord.
        let chord = self.points[seg + 1] - self.points[seg];
        chord.try_normalize().unwrap_or(Vec3::X)
    }

    /// Evenly spaced (by length) samples, `divisions + 1` points.
    pub fn spaced_points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }

    // Point at the raw (non arc-length) parameter `t` in [0, 1].
    fn point(&self, t: f32) -> Vec3 {
        let (seg, local) = self.locate(t);
        self.segments[seg].eval(local)
    }

    fn locate(&self, t: f32) -> (usize, f32) {
        let n = self.segments.len();
        let p = t.clamp(0.0, 1.0) * n as f32;
        let seg = (p.floor() as usize).min(n - 1);
        (seg, p - seg as f32)
    }

    fn build_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    // Map an arc-length fraction to the raw parameter via the length table.
    fn u_to_t(&self, u: f32) -> f32 {
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
        let total = self.length();
        let divisions = self.arc_lengths.len() - 1;
        if total <= f32::EPSILON {
            return u;
        }
        let target = u * total;
        // Last index whose cumulative length is <= target.
        let i = self
            .arc_lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(divisions - 1);
        let before = self.arc_lengths[i];
        let span = self.arc_lengths[i + 1] - before;
        let frac = if span > 0.0 {
            ((target - before) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (i as f32 + frac) / divisions as f32
    }
}

// Segment i runs from points[i] to points[i + 1]; missing neighbours at the
// ends are reflected through the end point.
fn centripetal_segment(points: &[Vec3], i: usize) -> Cubic {
    let last = points.len() - 1;
    let p1 = points[i];
    let p2 = points[i + 1];
    let p0 = if i > 0 {
        points[i - 1]
    } else {
        p1 * 2.0 - p2
    };
    let p3 = if i + 2 <= last {
        points[i + 2]
    } else {
        p2 * 2.0 - p1
    };

    // Knot spacing ^0.5 (centripetal).
    let mut dt1 = p1.distance(p2).sqrt();
    let mut dt0 = p0.distance(p1).sqrt();
    let mut dt2 = p2.distance(p3).sqrt();
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let mut m1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
    let mut m2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
    m1 *= dt1;
    m2 *= dt1;

    Cubic {
        c0: p1,
        c1: m1,
        c2: p1 * -3.0 + p2 * 3.0 - m1 * 2.0 - m2,
        c3: p1 * 2.0 - p2 * 2.0 + m1 + m2,
    }
}
