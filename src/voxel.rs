use std::collections::HashMap;

use rayon::prelude::*;

use crate::accessor::PointAccessor;
use crate::error::{Error, Result};

/// Reduces a point set by voxel-grid simplification.
///
/// Every handle is binned into the grid cell `(floor(x/s), floor(y/s),
/// floor(z/s))` for cell size `s`, and each occupied cell keeps a single
/// representative: the member closest to the cell's centroid, with exact ties
/// resolved to the lowest handle. Representative selection is independent per
/// cell and runs in parallel.
///
/// The output contains one handle per occupied cell, sorted ascending so the
/// reduced set is deterministic. Simplifying an already simplified set with
/// the same cell size returns it unchanged.
pub fn simplify<A: PointAccessor + ?Sized>(
    handles: &[usize],
    points: &A,
    voxel_size: f64,
) -> Result<Vec<usize>> {
    if voxel_size <= 0.0 || voxel_size.is_nan() {
        return Err(Error::InvalidVoxelSize(voxel_size));
    }

    let mut grid: HashMap<[i64; 3], Vec<usize>> = HashMap::new();
    for &handle in handles {
        let p = points.coordinate(handle);
        let key = [
            (p[0] / voxel_size).floor() as i64,
            (p[1] / voxel_size).floor() as i64,
            (p[2] / voxel_size).floor() as i64,
        ];
        grid.entry(key).or_default().push(handle);
    }

    let mut reduced: Vec<usize> = grid
        .par_iter()
        .map(|(_, members)| representative(members, points))
        .collect();
    reduced.sort_unstable();
    Ok(reduced)
}

/// The cell member with minimum squared distance to the cell centroid,
/// ties broken by the lowest handle.
fn representative<A: PointAccessor + ?Sized>(members: &[usize], points: &A) -> usize {
    let mut centroid = [0.0; 3];
    for &handle in members {
        let p = points.coordinate(handle);
        centroid[0] += p[0];
        centroid[1] += p[1];
        centroid[2] += p[2];
    }
    let inv = 1.0 / members.len() as f64;
    centroid[0] *= inv;
    centroid[1] *= inv;
    centroid[2] *= inv;

    let mut chosen = members[0];
    let mut min_dist = f64::INFINITY;
    for &handle in members {
        let p = points.coordinate(handle);
        let dx = p[0] - centroid[0];
        let dy = p[1] - centroid[1];
        let dz = p[2] - centroid[2];
        let dist = dx * dx + dy * dy + dz * dz;
        if dist < min_dist || (dist == min_dist && handle < chosen) {
            min_dist = dist;
            chosen = handle;
        }
    }
    chosen
}
