use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::{BuildHasherDefault, Hash};
use std::ops::Add;

use fnv::FnvHasher;
use itertools::Itertools;
use num_traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::grid::Grid;

type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Construct a hash map with the specified capacity. The Fnv hashing
/// algorithm is much faster than the default on short keys such as
/// coordinates.
/// Note it is less robust against security attacks on key collisions.
fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashMap::<K, V, _>::with_capacity_and_hasher(capacity, fnv)
}

// Trait (hack) used purely as a generic type parameter alias because it looks
// ugly to type this out each time. Generic parameter type aliases are not in
// the language, `type X = Y;` only works with concrete types.
pub trait MaxDistance:
    Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + Ord
{
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + Ord> MaxDistance
    for T
{
}

/// Step counts from a start coordinate to every cell reachable from it
/// through carved openings.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
where
    MaxDistanceT: MaxDistance,
{
    /// Breadth first flood of the grid from `start_coordinate`, travelling
    /// only through open walls. Returns None if the start coordinate is
    /// outside the grid.
    pub fn new(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances<MaxDistanceT>> {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let cells_count = grid.size();
        let mut distances = fnv_hashmap(cells_count);
        distances.insert(start_coordinate, Zero::zero());

        // The passages are unweighted, every step costs one, so the first
        // distance written for a cell is already the shortest and the
        // distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell: MaxDistanceT = *distances
                    .entry(*cell_coord)
                    .or_insert_with(Bounded::max_value);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in &*grid.open_neighbours(*cell_coord) {
                    let distance_to_link: MaxDistanceT = *distances
                        .entry(*link_coordinate)
                        .or_insert_with(Bounded::max_value);
                    if distance_to_link == Bounded::max_value() {
                        distances.insert(*link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// None for cells the flood never reached, including coordinates outside
    /// the grid.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let mut furthest = SmallVec::<[GridCoordinate; 8]>::new();
        let furthest_distance = self.max();

        for (coord, distance) in self.distances.iter() {
            if *distance == furthest_distance {
                furthest.push(*coord);
            }
        }
        furthest
    }
}

/// Path from the flood's start to `end_point`, rebuilt by walking from the
/// end through whichever open neighbour is closest to the start. None when
/// the end is unreachable or the distance data does not describe this grid.
pub fn shortest_path<MaxDistanceT>(
    grid: &Grid,
    distances_from_start: &Distances<MaxDistanceT>,
    end_point: GridCoordinate,
) -> Option<Vec<GridCoordinate>>
where
    MaxDistanceT: MaxDistance,
{
    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {
        let current_distance_to_start =
            distances_from_start.distance_from_start_to(current_coord)?;

        let neighbour_distances = grid
            .open_neighbours(current_coord)
            .iter()
            .filter_map(|&coord| {
                distances_from_start
                    .distance_from_start_to(coord)
                    .map(|distance| (coord, distance))
            })
            .collect::<SmallVec<[(GridCoordinate, MaxDistanceT); 8]>>();
        let closest_to_start = neighbour_distances
            .iter()
            .cloned()
            .fold1(|closest_accumulator, closest_candidate| {
                if closest_candidate.1 < closest_accumulator.1 {
                    closest_candidate
                } else {
                    closest_accumulator
                }
            });

        let (closer_coord, closer_distance) = closest_to_start?;
        if closer_distance >= current_distance_to_start {
            // Not getting any closer to the start, so the distance data
            // cannot belong to this grid.
            return None;
        }

        current_coord = closer_coord;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// The longest of the maze's shortest paths. Two floods: find the point
/// furthest from an arbitrary corner, then the path to the point furthest
/// from that one. On a perfect maze this is the tree's diameter, on grids
/// with cycles it is only an approximation.
pub fn longest_path<MaxDistanceT>(grid: &Grid) -> Option<Vec<GridCoordinate>>
where
    MaxDistanceT: MaxDistance,
{
    let first_distances = Distances::<MaxDistanceT>::new(grid, GridCoordinate::new(0, 0))?;
    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::<MaxDistanceT>::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}
