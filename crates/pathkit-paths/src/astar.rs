//! A* shortest-path search over implicit graphs.
//!
//! The open set is a [`PriorityQueue`] of entries ordered by the f-score
//! recorded when the entry was pushed. There is no decrease-key: when a
//! queued node gets a strictly cheaper path it is pushed again, and the
//! older entry is discarded once it reaches the root. `open_set_members`
//! holds exactly the nodes that still have a live entry in the queue.
//!
//! There is no closed set. A node may be expanded again if a cheaper path
//! to it turns up later, which only happens with inconsistent heuristics.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::heap::PriorityQueue;
use crate::traits::{AstarPather, Cost, FnPather};

/// A path found by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<N> {
    /// Nodes from the start to the goal node, both inclusive.
    pub nodes: Vec<N>,
    /// Sum of the edge costs along `nodes`.
    pub cost: Cost,
}

impl<N> Path<N> {
    /// Number of nodes on the path (at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a path holds at least its start node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Work counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes popped and expanded (neighbors enumerated).
    pub expanded: usize,
    /// Entries pushed onto the open set, including the start node.
    pub pushed: usize,
    /// Pushes for nodes that already had a live entry in the open set.
    pub requeued: usize,
    /// Outdated entries discarded when they reached the root.
    pub stale: usize,
}

/// Result of [`search`]: the path, if any, and the work it took.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome<N> {
    /// `None` when no goal node is reachable from the start.
    pub path: Option<Path<N>>,
    pub stats: SearchStats,
}

struct OpenEntry<N> {
    node: N,
    f: Cost,
}

fn lower_f<N>(a: &OpenEntry<N>, b: &OpenEntry<N>) -> bool {
    a.f < b.f
}

/// Run A* from `start` until a node satisfying `goal` is popped.
///
/// Edge costs must be non-negative and the estimate admissible for the
/// returned path to be a shortest one; neither is checked. Unreachable
/// goals are not an error: the reachable component is explored and the
/// outcome carries no path. For infinite graphs, termination is up to the
/// pather.
pub fn search<P, G>(pather: &P, start: P::Node, goal: G) -> SearchOutcome<P::Node>
where
    P: AstarPather + ?Sized,
    G: Fn(&P::Node) -> bool,
{
    let mut came_from: HashMap<P::Node, P::Node> = HashMap::new();
    let mut best_known_cost: HashMap<P::Node, Cost> = HashMap::new();
    let mut priority_score: HashMap<P::Node, Cost> = HashMap::new();
    let mut open = PriorityQueue::new(lower_f::<P::Node>);
    let mut open_set_members: HashSet<P::Node> = HashSet::new();
    let mut stats = SearchStats::default();
    let mut nbuf: Vec<P::Node> = Vec::new();

    let f0 = pather.estimate(&start);
    best_known_cost.insert(start.clone(), 0);
    priority_score.insert(start.clone(), f0);
    open_set_members.insert(start.clone());
    open.push(OpenEntry {
        node: start.clone(),
        f: f0,
    });
    stats.pushed += 1;

    while let Some(entry) = open.peek() {
        let current = entry.node.clone();
        let entry_f = entry.f;

        // A cheaper path was recorded after this entry was pushed.
        if priority_score.get(&current).is_some_and(|&f| f < entry_f) {
            open.pop();
            stats.stale += 1;
            continue;
        }

        if goal(&current) {
            let cost = best_known_cost.get(&current).copied().unwrap_or(0);
            let nodes = reconstruct(&came_from, &start, current);
            log::debug!(
                "astar: reached goal at cost {cost} ({} nodes, {} expanded, {} pushed)",
                nodes.len(),
                stats.expanded,
                stats.pushed
            );
            return SearchOutcome {
                path: Some(Path { nodes, cost }),
                stats,
            };
        }

        open.pop();
        open_set_members.remove(&current);
        stats.expanded += 1;

        let current_g = best_known_cost.get(&current).copied().unwrap_or(Cost::MAX);
        log::trace!("astar: expanding g={current_g} f={entry_f}, open={}", open.len());

        nbuf.clear();
        pather.neighbors(&current, &mut nbuf);
        for neighbor in nbuf.drain(..) {
            let tentative = current_g.saturating_add(pather.cost(&current, &neighbor));
            let known = best_known_cost.get(&neighbor).copied().unwrap_or(Cost::MAX);
            if tentative >= known {
                continue;
            }
            let f = tentative.saturating_add(pather.estimate(&neighbor));
            came_from.insert(neighbor.clone(), current.clone());
            best_known_cost.insert(neighbor.clone(), tentative);
            priority_score.insert(neighbor.clone(), f);
            if !open_set_members.insert(neighbor.clone()) {
                stats.requeued += 1;
            }
            open.push(OpenEntry { node: neighbor, f });
            stats.pushed += 1;
        }
    }

    log::debug!(
        "astar: open set exhausted without reaching a goal ({} expanded, {} pushed)",
        stats.expanded,
        stats.pushed
    );
    SearchOutcome { path: None, stats }
}

fn reconstruct<N: Eq + Hash + Clone>(came_from: &HashMap<N, N>, start: &N, goal: N) -> Vec<N> {
    let mut nodes = vec![goal];
    loop {
        let last = &nodes[nodes.len() - 1];
        if last == start {
            break;
        }
        let Some(prev) = came_from.get(last) else {
            break;
        };
        nodes.push(prev.clone());
    }
    nodes.reverse();
    nodes
}

/// Shortest path from `start` to the nearest node satisfying `goal`.
pub fn find_path<P, G>(pather: &P, start: P::Node, goal: G) -> Option<Path<P::Node>>
where
    P: AstarPather + ?Sized,
    G: Fn(&P::Node) -> bool,
{
    search(pather, start, goal).path
}

/// Shortest path from `start` to the fixed node `goal`.
pub fn find_path_to<P>(pather: &P, start: P::Node, goal: P::Node) -> Option<Path<P::Node>>
where
    P: AstarPather + ?Sized,
{
    find_path(pather, start, |n: &P::Node| *n == goal)
}

/// Closure form of [`find_path`]: returns just the nodes, start first.
///
/// ```
/// use pathkit_paths::astar;
///
/// // Walk along the integers from 0 to any multiple of 7 above 20.
/// let path = astar(
///     0i64,
///     |n: &i64| *n > 20 && n % 7 == 0,
///     |_: &i64, _: &i64| 1,
///     |_: &i64| 0,
///     |n: &i64| [n + 1, n + 5],
/// )
/// .unwrap();
/// assert_eq!(path.first(), Some(&0));
/// assert_eq!(path.last(), Some(&21));
/// ```
pub fn astar<N, I, G, D, H, Nb>(
    start: N,
    goal: G,
    distance: D,
    heuristic: H,
    neighbors: Nb,
) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    I: IntoIterator<Item = N>,
    G: Fn(&N) -> bool,
    D: Fn(&N, &N) -> Cost,
    H: Fn(&N) -> Cost,
    Nb: Fn(&N) -> I,
{
    let pather = FnPather::new(neighbors, distance, heuristic);
    find_path(&pather, start, goal).map(|path| path.nodes)
}

/// Closure form of [`find_path_to`].
pub fn astar_to<N, I, D, H, Nb>(
    start: N,
    goal: N,
    distance: D,
    heuristic: H,
    neighbors: Nb,
) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    I: IntoIterator<Item = N>,
    D: Fn(&N, &N) -> Cost,
    H: Fn(&N) -> Cost,
    Nb: Fn(&N) -> I,
{
    astar(start, move |n: &N| *n == goal, distance, heuristic, neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::manhattan;
    use pathkit_core::Point;

    /// Edge list graph over small integer nodes.
    struct EdgeGraph {
        edges: Vec<(u32, u32, Cost)>,
    }

    impl crate::Pather for EdgeGraph {
        type Node = u32;

        fn neighbors(&self, node: &u32, buf: &mut Vec<u32>) {
            buf.extend(self.edges.iter().filter(|e| e.0 == *node).map(|e| e.1));
        }
    }

    impl crate::WeightedPather for EdgeGraph {
        fn cost(&self, from: &u32, to: &u32) -> Cost {
            self.edges
                .iter()
                .filter(|e| e.0 == *from && e.1 == *to)
                .map(|e| e.2)
                .min()
                .unwrap_or(Cost::MAX)
        }
    }

    impl AstarPather for EdgeGraph {
        fn estimate(&self, _node: &u32) -> Cost {
            0
        }
    }

    fn path_cost(graph: &EdgeGraph, nodes: &[u32]) -> Cost {
        use crate::WeightedPather;
        nodes.windows(2).map(|w| graph.cost(&w[0], &w[1])).sum()
    }

    fn grid_neighbors(walls: &[Point], size: i32) -> impl Fn(&Point) -> Vec<Point> + '_ {
        move |p: &Point| {
            p.neighbors_4()
                .into_iter()
                .filter(|n| n.x >= 0 && n.y >= 0 && n.x < size && n.y < size)
                .filter(|n| !walls.contains(n))
                .collect()
        }
    }

    #[test]
    fn detours_around_wall() {
        let walls = [Point::new(1, 0), Point::new(1, 1)];
        let goal = Point::new(2, 2);
        let path = astar_to(
            Point::new(0, 0),
            goal,
            |_: &Point, _: &Point| 1,
            |p: &Point| Cost::from(manhattan(*p, goal)),
            grid_neighbors(&walls, 3),
        )
        .unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn start_satisfying_goal_is_single_node_path() {
        let graph = EdgeGraph {
            edges: vec![(0, 1, 1)],
        };
        let outcome = search(&graph, 0, |_: &u32| true);
        let path = outcome.path.unwrap();
        assert_eq!(path.nodes, vec![0]);
        assert_eq!(path.cost, 0);
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn fixed_goal_overload_matches_predicate() {
        let graph = EdgeGraph {
            edges: vec![(0, 1, 4), (0, 2, 1), (2, 1, 1), (1, 3, 1)],
        };
        let a = find_path_to(&graph, 0, 3).unwrap();
        let b = find_path(&graph, 0, |n: &u32| *n == 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.nodes, vec![0, 2, 1, 3]);
        assert_eq!(a.cost, 3);
    }

    #[test]
    fn unreachable_goal_explores_component_once() {
        // 0-1-2 form one component, 3-4 another.
        let graph = EdgeGraph {
            edges: vec![(0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 1, 1), (3, 4, 1), (4, 3, 1)],
        };
        let outcome = search(&graph, 0, |n: &u32| *n == 4);
        assert!(outcome.path.is_none());
        assert_eq!(outcome.stats.expanded, 3);
        assert_eq!(outcome.stats.pushed, 3);
        assert_eq!(outcome.stats.requeued, 0);
    }

    #[test]
    fn dead_end_start_has_no_path() {
        let graph = EdgeGraph { edges: vec![] };
        let outcome = search(&graph, 7, |n: &u32| *n == 8);
        assert_eq!(outcome.path, None);
        assert_eq!(outcome.stats.expanded, 1);
    }

    #[test]
    fn requeued_node_keeps_cheapest_predecessor() {
        // 3 is first reached directly at cost 10, then through 1 at cost 3.
        let graph = EdgeGraph {
            edges: vec![(0, 3, 10), (0, 1, 1), (1, 3, 2), (3, 4, 1)],
        };
        let outcome = search(&graph, 0, |n: &u32| *n == 4);
        let path = outcome.path.unwrap();
        assert_eq!(path.nodes, vec![0, 1, 3, 4]);
        assert_eq!(path.cost, 4);
        assert_eq!(outcome.stats.requeued, 1);
        assert_eq!(outcome.stats.pushed, 5);
    }

    #[test]
    fn stale_entries_are_skipped() {
        // 2 is queued at cost 9, improved to 2 via 1, and the goal 5 sits
        // behind the old entry so it surfaces before the search ends.
        let graph = EdgeGraph {
            edges: vec![(0, 2, 9), (0, 1, 1), (1, 2, 1), (2, 3, 10), (3, 5, 1)],
        };
        let outcome = search(&graph, 0, |n: &u32| *n == 5);
        let path = outcome.path.unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2, 3, 5]);
        assert_eq!(path.cost, 13);
        assert_eq!(outcome.stats.stale, 1);
        // Node 2 expanded once despite two queue entries.
        assert_eq!(outcome.stats.expanded, 4);
    }

    #[test]
    fn predicate_goal_finds_nearest() {
        let graph = EdgeGraph {
            edges: vec![(0, 1, 5), (0, 2, 2), (2, 3, 2), (1, 9, 0), (3, 8, 0)],
        };
        let path = find_path(&graph, 0, |n: &u32| *n >= 8).unwrap();
        assert_eq!(path.nodes, vec![0, 2, 3, 8]);
        assert_eq!(path.cost, 4);
    }

    #[test]
    fn inconsistent_heuristic_still_terminates() {
        // The estimate at 1 is far too high, so the search settles for the
        // dearer route through 2. The path it returns must still be coherent.
        let graph = EdgeGraph {
            edges: vec![(0, 1, 1), (0, 2, 5), (1, 3, 1), (2, 3, 5), (3, 4, 1)],
        };
        let pather = FnPather::new(
            |n: &u32| {
                let mut buf = Vec::new();
                crate::Pather::neighbors(&graph, n, &mut buf);
                buf
            },
            |a: &u32, b: &u32| crate::WeightedPather::cost(&graph, a, b),
            |n: &u32| if *n == 1 { 20 } else { 0 },
        );
        let path = find_path_to(&pather, 0, 4).unwrap();
        assert_eq!(path.nodes, vec![0, 2, 3, 4]);
        assert_eq!(path.cost, path_cost(&graph, &path.nodes));
    }

    /// Bellman-Ford over a weighted grid; weights[y][x] is the cost of entering (x, y).
    fn reference_costs(weights: &[Vec<Cost>], start: Point) -> HashMap<Point, Cost> {
        let h = weights.len() as i32;
        let w = weights[0].len() as i32;
        let mut dist: HashMap<Point, Cost> = HashMap::new();
        dist.insert(start, 0);
        loop {
            let mut changed = false;
            for y in 0..h {
                for x in 0..w {
                    let p = Point::new(x, y);
                    let Some(&d) = dist.get(&p) else { continue };
                    for n in p.neighbors_4() {
                        if n.x < 0 || n.y < 0 || n.x >= w || n.y >= h {
                            continue;
                        }
                        let nd = d + weights[n.y as usize][n.x as usize];
                        if dist.get(&n).is_none_or(|&old| nd < old) {
                            dist.insert(n, nd);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                return dist;
            }
        }
    }

    #[test]
    fn optimal_on_random_weighted_grids() {
        const SIZE: i32 = 9;
        for _ in 0..20 {
            let weights: Vec<Vec<Cost>> = (0..SIZE)
                .map(|_| (0..SIZE).map(|_| rand::random_range(1..10)).collect())
                .collect();
            let start = Point::new(0, 0);
            let goal = Point::new(
                rand::random_range(0..SIZE),
                rand::random_range(0..SIZE),
            );
            let expected = reference_costs(&weights, start)[&goal];

            let pather = FnPather::new(
                |p: &Point| {
                    p.neighbors_4()
                        .into_iter()
                        .filter(|n| n.x >= 0 && n.y >= 0 && n.x < SIZE && n.y < SIZE)
                },
                |_: &Point, to: &Point| weights[to.y as usize][to.x as usize],
                // Every step costs at least 1, so Manhattan never overestimates.
                |p: &Point| Cost::from(manhattan(*p, goal)),
            );
            let outcome = search(&pather, start, |p: &Point| *p == goal);
            let path = outcome.path.unwrap();
            assert_eq!(path.cost, expected);
            assert_eq!(path.nodes.first(), Some(&start));
            assert_eq!(path.nodes.last(), Some(&goal));
            let walked: Cost = path.nodes[1..]
                .iter()
                .map(|p| weights[p.y as usize][p.x as usize])
                .sum();
            assert_eq!(walked, expected);
            for w in path.nodes.windows(2) {
                assert_eq!(manhattan(w[0], w[1]), 1);
            }
            assert!(outcome.stats.expanded <= (SIZE * SIZE) as usize);
        }
    }

    #[test]
    fn neighbors_may_return_a_set() {
        let path = astar_to(
            1u64,
            10,
            |_: &u64, _: &u64| 1,
            |_: &u64| 0,
            |n: &u64| HashSet::from([n * 2, n + 1]),
        )
        .unwrap();
        // 1 -> 2 -> 4 -> 5 -> 10
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&1));
        assert_eq!(path.last(), Some(&10));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        let outcome = SearchOutcome {
            path: Some(Path {
                nodes: vec![1u32, 2, 3],
                cost: 7,
            }),
            stats: SearchStats {
                expanded: 2,
                pushed: 3,
                requeued: 0,
                stale: 0,
            },
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SearchOutcome<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
