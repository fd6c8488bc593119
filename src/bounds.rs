/// Axis-aligned bounding box in 3D space.
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// An inverted box that any point will expand.
    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    /// Grows the box to contain `point`.
    pub fn extend(&mut self, point: [f64; 3]) {
        for axis in 0..3 {
            if point[axis] < self.min[axis] {
                self.min[axis] = point[axis];
            }
            if point[axis] > self.max[axis] {
                self.max[axis] = point[axis];
            }
        }
    }

    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// The axis with the greatest extent; ties resolve to X before Y before Z.
    pub fn longest_axis(&self) -> usize {
        if self.extent(0) >= self.extent(1) && self.extent(0) >= self.extent(2) {
            0
        } else if self.extent(1) >= self.extent(2) {
            1
        } else {
            2
        }
    }

    pub fn midpoint(&self, axis: usize) -> f64 {
        (self.min[axis] + self.max[axis]) / 2.0
    }

    /// Minimum squared distance from `point` to the box, 0 if inside.
    pub fn dist_sq_to(&self, point: [f64; 3]) -> f64 {
        let dx = (self.min[0] - point[0]).max(0.0).max(point[0] - self.max[0]);
        let dy = (self.min[1] - point[1]).max(0.0).max(point[1] - self.max[1]);
        let dz = (self.min[2] - point[2]).max(0.0).max(point[2] - self.max[2]);
        dx * dx + dy * dy + dz * dz
    }
}
