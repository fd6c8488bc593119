use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::accessor::PointAccessor;
use crate::bounds::BoundingBox;

/// Maximum number of handles stored in a leaf before the range is split.
pub const BUCKET_CAPACITY: usize = 10;

#[derive(Clone, Copy, Debug)]
struct KdNode {
    bounds: BoundingBox,
    left: u32, // u32::MAX if leaf
    right: u32,
    // Leaf data: handles[start..end]
    start: u32,
    end: u32,
    // Internal node data
    split_val: f64,
    axis: u8,
}

impl KdNode {
    fn is_leaf(&self) -> bool {
        self.left == u32::MAX
    }
}

/// A bucketed kd-tree over point handles.
///
/// Nodes live in a flat arena indexed by `u32`, with the root as the last
/// node pushed during the recursive build. The tree owns only handles; point
/// coordinates are read through a [`PointAccessor`] at build and query time.
///
/// Splits follow the sliding-midpoint rule: the split plane starts at the
/// bounding-box midpoint of the longest axis and handles lying exactly on the
/// plane are distributed so that both children stay non-empty. This keeps the
/// depth logarithmic even for heavily clustered or fully coincident input,
/// where a median split could degenerate.
pub struct KdTree {
    nodes: Vec<KdNode>,
    handles: Vec<usize>,
}

impl KdTree {
    /// Builds a tree over `handles`. An empty handle set produces an empty
    /// tree on which every query returns no results.
    pub fn build<A: PointAccessor + ?Sized>(handles: Vec<usize>, points: &A) -> Self {
        let mut tree = KdTree {
            nodes: Vec::new(),
            handles,
        };

        let count = tree.handles.len();
        if count == 0 {
            return tree;
        }

        // Reserve memory to avoid reallocations; a bucketed tree has fewer
        // than 2 * N / B internal-plus-leaf nodes.
        tree.nodes.reserve(count * 2 / BUCKET_CAPACITY + 1);
        tree.build_recursive(0, count, points);
        tree
    }

    /// Number of indexed handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The indexed handles, in arena order.
    pub fn handles(&self) -> &[usize] {
        &self.handles
    }

    fn root(&self) -> u32 {
        // Root is the last node pushed in the recursive build.
        (self.nodes.len() - 1) as u32
    }

    fn build_recursive<A: PointAccessor + ?Sized>(
        &mut self,
        start: usize,
        end: usize,
        points: &A,
    ) -> u32 {
        let count = end - start;

        let mut bounds = BoundingBox::empty();
        for i in start..end {
            bounds.extend(points.coordinate(self.handles[i]));
        }

        if count <= BUCKET_CAPACITY {
            let node_idx = self.nodes.len() as u32;
            self.nodes.push(KdNode {
                bounds,
                left: u32::MAX,
                right: u32::MAX,
                start: start as u32,
                end: end as u32,
                split_val: 0.0,
                axis: 0,
            });
            return node_idx;
        }

        let axis = bounds.longest_axis();
        let split_val = bounds.midpoint(axis);

        // Three-way partition of handles[start..end] around the split plane:
        // [< split | == split | > split].
        let mut lt = start;
        let mut i = start;
        let mut gt = end;
        while i < gt {
            let coord = points.coordinate(self.handles[i])[axis];
            if coord < split_val {
                self.handles.swap(lt, i);
                lt += 1;
                i += 1;
            } else if coord > split_val {
                gt -= 1;
                self.handles.swap(i, gt);
            } else {
                i += 1;
            }
        }

        // Handles exactly on the plane may go to either side. Slide the cut
        // toward the half-count, clamped so both children get at least one
        // handle; strict sides cannot move across the plane.
        let mid = (start + count / 2).clamp(lt.max(start + 1), gt.min(end - 1));

        let left = self.build_recursive(start, mid, points);
        let right = self.build_recursive(mid, end, points);

        let node_idx = self.nodes.len() as u32;
        self.nodes.push(KdNode {
            bounds,
            left,
            right,
            start: 0,
            end: 0,
            split_val,
            axis: axis as u8,
        });
        node_idx
    }

    /// Collects every handle whose point lies within `radius` of `query`
    /// (closed sphere). Result order is traversal order; callers must not
    /// rely on it. A zero radius matches exactly coincident points only.
    ///
    /// The radius must already be validated as non-negative.
    pub fn range_search<A: PointAccessor + ?Sized>(
        &self,
        points: &A,
        query: [f64; 3],
        radius: f64,
        output: &mut Vec<usize>,
    ) {
        if self.nodes.is_empty() {
            return;
        }
        self.range_recursive(self.root(), points, query, radius * radius, output);
    }

    fn range_recursive<A: PointAccessor + ?Sized>(
        &self,
        node_idx: u32,
        points: &A,
        query: [f64; 3],
        radius_sq: f64,
        output: &mut Vec<usize>,
    ) {
        let node = &self.nodes[node_idx as usize];

        // Prune subtrees whose box cannot intersect the search sphere.
        if node.bounds.dist_sq_to(query) > radius_sq {
            return;
        }

        if node.is_leaf() {
            for i in node.start..node.end {
                let handle = self.handles[i as usize];
                if dist_sq(points.coordinate(handle), query) <= radius_sq {
                    output.push(handle);
                }
            }
            return;
        }

        // Visit the near child first.
        let diff = query[node.axis as usize] - node.split_val;
        let (first, second) = if diff <= 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.range_recursive(first, points, query, radius_sq, output);
        self.range_recursive(second, points, query, radius_sq, output);
    }

    /// Collects the `min(k, len)` handles closest to `query`, appended to
    /// `output` in ascending distance order. Exact distance ties resolve to
    /// the lower handle.
    pub fn knn_search<A: PointAccessor + ?Sized>(
        &self,
        points: &A,
        query: [f64; 3],
        k: usize,
        output: &mut Vec<usize>,
    ) {
        if self.nodes.is_empty() || k == 0 {
            return;
        }

        // Best-first traversal: a frontier of subtrees ordered by minimum
        // possible distance, and a bounded max-heap of the k best candidates.
        // The heap never holds more than len() entries, so the preallocation
        // must not trust a caller-chosen k that may be near usize::MAX.
        let mut frontier = BinaryHeap::new();
        let mut best: BinaryHeap<Candidate> =
            BinaryHeap::with_capacity(k.min(self.handles.len()) + 1);

        frontier.push(Frontier {
            dist_sq: self.nodes[self.root() as usize].bounds.dist_sq_to(query),
            node: self.root(),
        });

        while let Some(item) = frontier.pop() {
            // Every remaining subtree is at least as far as this one, so once
            // the candidate set is full and strictly closer we are done.
            if best.len() == k && item.dist_sq > best.peek().map_or(f64::INFINITY, |c| c.dist_sq) {
                break;
            }

            let node = &self.nodes[item.node as usize];
            if node.is_leaf() {
                for i in node.start..node.end {
                    let handle = self.handles[i as usize];
                    let candidate = Candidate {
                        dist_sq: dist_sq(points.coordinate(handle), query),
                        handle,
                    };
                    if best.len() < k {
                        best.push(candidate);
                    } else if let Some(worst) = best.peek() {
                        if candidate.cmp(worst) == Ordering::Less {
                            best.pop();
                            best.push(candidate);
                        }
                    }
                }
            } else {
                for child in [node.left, node.right] {
                    frontier.push(Frontier {
                        dist_sq: self.nodes[child as usize].bounds.dist_sq_to(query),
                        node: child,
                    });
                }
            }
        }

        let ordered = best.into_sorted_vec();
        output.extend(ordered.into_iter().map(|c| c.handle));
    }
}

fn dist_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// A kept neighbor candidate; the heap maximum is the worst candidate
/// (greatest distance, then greatest handle).
#[derive(Clone, Copy)]
struct Candidate {
    dist_sq: f64,
    handle: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist_sq
            .partial_cmp(&other.dist_sq)
            .unwrap_or(Ordering::Equal)
            .then(self.handle.cmp(&other.handle))
    }
}

struct Frontier {
    dist_sq: f64,
    node: u32,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.dist_sq == other.dist_sq
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Reverse ordering for min-heap behavior
        other.dist_sq.partial_cmp(&self.dist_sq)
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}
