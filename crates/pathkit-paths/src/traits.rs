use std::hash::Hash;
use std::marker::PhantomData;

/// Path cost. Absent costs are treated as `Cost::MAX` (unreachable).
pub type Cost = i64;

/// Minimal search interface: neighbor enumeration over an implicit graph.
pub trait Pather {
    /// Node identity. Used as a map key and set element during a search.
    type Node: Eq + Hash + Clone;

    /// Append the nodes directly reachable from `node` into `buf`. The
    /// caller clears `buf` before calling. Appending nothing marks a dead end.
    fn neighbors(&self, node: &Self::Node, buf: &mut Vec<Self::Node>);
}

/// Pather with weighted edges.
pub trait WeightedPather: Pather {
    /// Cost of the edge from `from` to its neighbor `to`. Must be >= 0.
    fn cost(&self, from: &Self::Node, to: &Self::Node) -> Cost;
}

/// Full A* pather.
pub trait AstarPather: WeightedPather {
    /// Estimated remaining cost from `node` to the nearest goal.
    ///
    /// Must never overestimate (admissible) for returned paths to be
    /// optimal, and should be consistent to avoid re-expanding nodes.
    fn estimate(&self, node: &Self::Node) -> Cost;
}

/// An [`AstarPather`] assembled from three closures.
///
/// `neighbors` may return any iterable of nodes (a `Vec`, a `HashSet`, an
/// array, an iterator chain).
pub struct FnPather<N, I, Nb, D, H> {
    neighbors: Nb,
    distance: D,
    heuristic: H,
    _marker: PhantomData<fn(&N) -> I>,
}

impl<N, I, Nb, D, H> FnPather<N, I, Nb, D, H>
where
    N: Eq + Hash + Clone,
    I: IntoIterator<Item = N>,
    Nb: Fn(&N) -> I,
    D: Fn(&N, &N) -> Cost,
    H: Fn(&N) -> Cost,
{
    pub fn new(neighbors: Nb, distance: D, heuristic: H) -> Self {
        Self {
            neighbors,
            distance,
            heuristic,
            _marker: PhantomData,
        }
    }
}

impl<N, I, Nb, D, H> Pather for FnPather<N, I, Nb, D, H>
where
    N: Eq + Hash + Clone,
    I: IntoIterator<Item = N>,
    Nb: Fn(&N) -> I,
{
    type Node = N;

    fn neighbors(&self, node: &N, buf: &mut Vec<N>) {
        buf.extend((self.neighbors)(node));
    }
}

impl<N, I, Nb, D, H> WeightedPather for FnPather<N, I, Nb, D, H>
where
    N: Eq + Hash + Clone,
    I: IntoIterator<Item = N>,
    Nb: Fn(&N) -> I,
    D: Fn(&N, &N) -> Cost,
{
    #[inline]
    fn cost(&self, from: &N, to: &N) -> Cost {
        (self.distance)(from, to)
    }
}

impl<N, I, Nb, D, H> AstarPather for FnPather<N, I, Nb, D, H>
where
    N: Eq + Hash + Clone,
    I: IntoIterator<Item = N>,
    Nb: Fn(&N) -> I,
    D: Fn(&N, &N) -> Cost,
    H: Fn(&N) -> Cost,
{
    #[inline]
    fn estimate(&self, node: &N) -> Cost {
        (self.heuristic)(node)
    }
}
