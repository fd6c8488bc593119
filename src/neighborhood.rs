use rayon::prelude::*;

use crate::accessor::PointAccessor;
use crate::error::{Error, Result};
use crate::kdtree::KdTree;
use crate::voxel;

/// Precomputed spatial searching structure for an input point set, giving
/// access to local neighborhoods of points.
///
/// A `Neighborhood` is built once over a caller-owned point set and is
/// immutable afterwards. It hands out [`KNeighborQuery`] and
/// [`RangeNeighborQuery`] functors, which are the only surface downstream
/// feature-extraction code should consume. The index stores handles only;
/// the backing point storage is borrowed for the lifetime of the index and
/// must not change while it exists.
///
/// Queries are read-only and lock-free: any number of functors may be
/// invoked concurrently from multiple threads once construction is done.
pub struct Neighborhood<'a, A: PointAccessor + ?Sized> {
    points: &'a A,
    tree: KdTree,
}

impl<'a, A: PointAccessor + ?Sized> Neighborhood<'a, A> {
    /// Builds a neighborhood over every point of the input.
    pub fn new(points: &'a A) -> Self {
        let handles: Vec<usize> = (0..points.len()).collect();
        Self {
            points,
            tree: KdTree::build(handles, points),
        }
    }

    /// Builds a neighborhood over a simplified version of the input.
    ///
    /// The point set is first downsampled on a voxel grid of cell size
    /// `voxel_size` (see [`crate::voxel::simplify`]), so queries operate at
    /// a coarser scale. Fails with [`Error::InvalidVoxelSize`] if the cell
    /// size is not strictly positive.
    pub fn with_voxel_size(points: &'a A, voxel_size: f64) -> Result<Self> {
        let handles: Vec<usize> = (0..points.len()).collect();
        let reduced = voxel::simplify(&handles, points, voxel_size)?;
        Ok(Self {
            points,
            tree: KdTree::build(reduced, points),
        })
    }

    /// Number of indexed handles (after simplification, if any).
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The indexed handles, in index-internal order.
    pub fn indexed_handles(&self) -> &[usize] {
        self.tree.handles()
    }

    /// Returns a neighbor query functor with a fixed number of neighbors `k`.
    pub fn k_neighbor_query(&self, k: usize) -> KNeighborQuery<'_, A> {
        KNeighborQuery {
            neighborhood: self,
            k,
        }
    }

    /// Returns a neighbor query functor with a fixed search `radius`.
    ///
    /// Fails with [`Error::InvalidRadius`] if the radius is negative.
    pub fn range_neighbor_query(&self, radius: f64) -> Result<RangeNeighborQuery<'_, A>> {
        if radius < 0.0 || radius.is_nan() {
            return Err(Error::InvalidRadius(radius));
        }
        Ok(RangeNeighborQuery {
            neighborhood: self,
            radius,
        })
    }

    /// The `min(k, len)` indexed handles closest to `query`, in ascending
    /// distance order; exact ties resolve to the lower handle.
    pub fn k_neighbors(&self, query: [f64; 3], k: usize, output: &mut Vec<usize>) {
        self.tree.knn_search(self.points, query, k, output);
    }

    /// Every indexed handle within `radius` of `query` (closed sphere), in
    /// unspecified order. Fails with [`Error::InvalidRadius`] if the radius
    /// is negative.
    pub fn range_neighbors(&self, query: [f64; 3], radius: f64, output: &mut Vec<usize>) -> Result<()> {
        if radius < 0.0 || radius.is_nan() {
            return Err(Error::InvalidRadius(radius));
        }
        self.tree.range_search(self.points, query, radius, output);
        Ok(())
    }

    /// Runs `query` once per indexed handle, centered on that handle's
    /// point, in parallel. One result vector per indexed handle, in
    /// [`Self::indexed_handles`] order.
    pub fn neighbors_of_indexed<Q>(&self, query: &Q) -> Vec<Vec<usize>>
    where
        Q: NeighborQuery + Sync,
    {
        self.tree
            .handles()
            .par_iter()
            .map(|&handle| query.collect(self.points.coordinate(handle)))
            .collect()
    }
}

/// Uniform "given a point, produce handles" contract consumed by downstream
/// feature and classification code.
pub trait NeighborQuery {
    /// Appends the neighbors of `query` to `output`.
    fn neighbors(&self, query: [f64; 3], output: &mut Vec<usize>);

    /// Convenience wrapper returning a fresh vector.
    fn collect(&self, query: [f64; 3]) -> Vec<usize> {
        let mut output = Vec::new();
        self.neighbors(query, &mut output);
        output
    }
}

/// Functor that computes the neighborhood of a point as its `k` nearest
/// indexed points.
///
/// Holds no mutable state; it is `Copy` and safe to invoke concurrently.
pub struct KNeighborQuery<'a, A: PointAccessor + ?Sized> {
    neighborhood: &'a Neighborhood<'a, A>,
    k: usize,
}

impl<A: PointAccessor + ?Sized> NeighborQuery for KNeighborQuery<'_, A> {
    fn neighbors(&self, query: [f64; 3], output: &mut Vec<usize>) {
        self.neighborhood.k_neighbors(query, self.k, output);
    }
}

impl<A: PointAccessor + ?Sized> Clone for KNeighborQuery<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: PointAccessor + ?Sized> Copy for KNeighborQuery<'_, A> {}

/// Functor that computes the neighborhood of a point as the indexed points
/// lying in a sphere of fixed radius centered on it.
///
/// The radius is validated when the functor is created, so invocation never
/// fails. Holds no mutable state; it is `Copy` and safe to invoke
/// concurrently.
pub struct RangeNeighborQuery<'a, A: PointAccessor + ?Sized> {
    neighborhood: &'a Neighborhood<'a, A>,
    radius: f64,
}

impl<A: PointAccessor + ?Sized> NeighborQuery for RangeNeighborQuery<'_, A> {
    fn neighbors(&self, query: [f64; 3], output: &mut Vec<usize>) {
        self.neighborhood
            .tree
            .range_search(self.neighborhood.points, query, self.radius, output);
    }
}

impl<A: PointAccessor + ?Sized> Clone for RangeNeighborQuery<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: PointAccessor + ?Sized> Copy for RangeNeighborQuery<'_, A> {}
