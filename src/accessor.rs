/// Read-only access to the caller's point storage.
///
/// A handle is the index of a point in the caller's original sequence; the
/// index only ever stores handles and reads coordinates through this trait.
/// The mapping must stay constant for the lifetime of any index built on it,
/// and `Sync` is required so queries can run from multiple threads.
pub trait PointAccessor: Sync {
    /// Number of points in the underlying sequence; valid handles are `0..len()`.
    fn len(&self) -> usize;

    /// Coordinates of the point identified by `handle`.
    fn coordinate(&self, handle: usize) -> [f64; 3];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointAccessor for [[f64; 3]] {
    fn len(&self) -> usize {
        <[[f64; 3]]>::len(self)
    }

    fn coordinate(&self, handle: usize) -> [f64; 3] {
        self[handle]
    }
}

impl PointAccessor for Vec<[f64; 3]> {
    fn len(&self) -> usize {
        <[[f64; 3]]>::len(self)
    }

    fn coordinate(&self, handle: usize) -> [f64; 3] {
        self[handle]
    }
}

/// Adapter for interleaved flat storage (`[x0, y0, z0, x1, y1, z1, ...]`).
#[derive(Clone, Copy, Debug)]
pub struct FlatPoints<'a>(pub &'a [f64]);

impl PointAccessor for FlatPoints<'_> {
    fn len(&self) -> usize {
        self.0.len() / 3
    }

    fn coordinate(&self, handle: usize) -> [f64; 3] {
        [
            self.0[handle * 3],
            self.0[handle * 3 + 1],
            self.0[handle * 3 + 2],
        ]
    }
}
