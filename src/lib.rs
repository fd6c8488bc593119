//! # nearthree
//!
//! `nearthree` is a Rust library for fast approximate and exact neighbor
//! queries over static, in-memory 3D point sets: "the k closest points to X"
//! and "all points within radius r of X". It is the spatial-indexing
//! substrate for point-cloud feature extraction and classification code.
//!
//! ## Features
//!
//! - **Bucketed kd-tree**: arena-allocated nodes with sliding-midpoint
//!   splits, giving logarithmic depth even for clustered or duplicate-heavy
//!   point clouds.
//! - **Voxel Simplification**: optional grid-based downsampling keeping one
//!   representative per occupied cell, for neighbor queries at a coarser scale.
//! - **Query Functors**: immutable, copyable [`KNeighborQuery`] and
//!   [`RangeNeighborQuery`] objects safe to invoke from multiple threads.
//! - **Borrowed Storage**: the index reads points through a caller-supplied
//!   [`PointAccessor`] and never copies coordinates.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Neighborhood`] struct, which builds the
//! index and hands out query functors.
//!
//! ```
//! use nearthree::{Neighborhood, NeighborQuery};
//!
//! let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [5.0, 5.0, 5.0]];
//! let neighborhood = Neighborhood::new(points.as_slice());
//!
//! let knn = neighborhood.k_neighbor_query(2);
//! assert_eq!(knn.collect([0.0, 0.0, 0.0]), vec![0, 1]);
//!
//! let range = neighborhood.range_neighbor_query(1.5).unwrap();
//! assert_eq!(range.collect([0.0, 0.0, 0.0]).len(), 2);
//! ```

mod accessor;
mod bounds;
mod error;
mod kdtree;
mod neighborhood;
mod voxel;

pub use accessor::FlatPoints;
pub use accessor::PointAccessor;
pub use bounds::BoundingBox;
pub use error::Error;
pub use error::Result;
pub use kdtree::BUCKET_CAPACITY;
pub use kdtree::KdTree;
pub use neighborhood::KNeighborQuery;
pub use neighborhood::NeighborQuery;
pub use neighborhood::Neighborhood;
pub use neighborhood::RangeNeighborQuery;
pub use voxel::simplify;
