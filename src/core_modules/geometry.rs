// THEORY:
// The `geometry` module measures what the labeler found. Area is the member
// cell count — exact integer pixels, no sub-pixel weighting. Perimeter is the
// "exposed edge count": for every member cell, each of its 4 edge-neighbors
// that is NOT a member contributes one edge, and a neighbor beyond the grid
// boundary counts as a non-member.
//
// This definition is exactly consistent with area under 4-connectivity: a
// single-pixel region always measures perimeter 4, and joining two regions
// across k shared edges shrinks their total perimeter by exactly 2k. Both
// stages iterate the same `NEIGHBOR_OFFSETS_4`, so area and perimeter can
// never disagree about what an "edge" is.

use std::collections::HashSet;

use crate::core_modules::region::{Point, Region};
use crate::core_modules::region_labeler::region_labeler::NEIGHBOR_OFFSETS_4;

/// The measured geometry of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionGeometry {
    /// Member cell count, in pixels.
    pub area: u64,
    /// Exposed boundary edge count.
    pub perimeter: u64,
}

/// A labeled region paired with its measured geometry. The per-region detail
/// behind the aggregated report.
#[derive(Debug, Clone)]
pub struct MeasuredRegion {
    pub region: Region,
    pub geometry: RegionGeometry,
}

/// Measures one region. Pure; the region's cell order does not affect the
/// result.
pub fn measure_region(region: &Region) -> RegionGeometry {
    let members: HashSet<Point> = region.cells.iter().copied().collect();

    let mut perimeter = 0u64;
    for cell in &region.cells {
        for (dx, dy) in &NEIGHBOR_OFFSETS_4 {
            let nx = cell.x as i32 + dx;
            let ny = cell.y as i32 + dy;
            // Off-grid coordinates are never members, so edges on the image
            // border are exposed automatically.
            let neighbor_is_member = nx >= 0
                && ny >= 0
                && members.contains(&Point {
                    x: nx as u32,
                    y: ny as u32,
                });
            if !neighbor_is_member {
                perimeter += 1;
            }
        }
    }

    RegionGeometry {
        area: region.cells.len() as u64,
        perimeter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::classifier::Category;

    fn region_from_cells(cells: &[(u32, u32)]) -> Region {
        let points: Vec<Point> = cells.iter().map(|&(x, y)| Point { x, y }).collect();
        let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
        Region {
            id: 0,
            category: Category::Red,
            cells: points,
            bounding_box: (Point { x: min_x, y: min_y }, Point { x: max_x, y: max_y }),
        }
    }

    #[test]
    fn single_pixel_measures_area_one_perimeter_four() {
        let geometry = measure_region(&region_from_cells(&[(0, 0)]));
        assert_eq!(geometry.area, 1);
        assert_eq!(geometry.perimeter, 4);
    }

    #[test]
    fn solid_rectangle_measures_classic_formulas() {
        // 3 wide, 2 tall: area = 6, perimeter = 2 * (3 + 2) = 10.
        let cells: Vec<(u32, u32)> = (0..2).flat_map(|y| (0..3).map(move |x| (x, y))).collect();
        let geometry = measure_region(&region_from_cells(&cells));
        assert_eq!(geometry.area, 6);
        assert_eq!(geometry.perimeter, 10);
    }

    #[test]
    fn rectangle_touching_the_border_still_counts_outer_edges() {
        // Border edges are exposed like any other non-member edge, so placement
        // within the grid never changes the measurement.
        let at_origin = region_from_cells(&[(0, 0), (1, 0)]);
        let interior = region_from_cells(&[(5, 5), (6, 5)]);
        assert_eq!(measure_region(&at_origin), measure_region(&interior));
    }

    #[test]
    fn joining_regions_removes_two_edges_per_shared_edge() {
        let left = measure_region(&region_from_cells(&[(0, 0)]));
        let right = measure_region(&region_from_cells(&[(1, 0)]));
        let joined = measure_region(&region_from_cells(&[(0, 0), (1, 0)]));
        assert_eq!(
            joined.perimeter,
            left.perimeter + right.perimeter - 2,
            "one shared edge must cancel exactly two exposed edges"
        );
    }

    #[test]
    fn concave_shapes_measure_their_full_outline() {
        // An L of three cells: area 3, perimeter 8.
        let geometry = measure_region(&region_from_cells(&[(0, 0), (0, 1), (1, 1)]));
        assert_eq!(geometry.area, 3);
        assert_eq!(geometry.perimeter, 8);

        // A plus of five cells: area 5, perimeter 12.
        let geometry =
            measure_region(&region_from_cells(&[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]));
        assert_eq!(geometry.area, 5);
        assert_eq!(geometry.perimeter, 12);
    }

    #[test]
    fn perimeter_is_always_even() {
        let shapes: Vec<Vec<(u32, u32)>> = vec![
            vec![(0, 0)],
            vec![(0, 0), (1, 0), (2, 0)],
            vec![(0, 0), (0, 1), (1, 1), (1, 2)],
            vec![(1, 0), (0, 1), (1, 1), (2, 1), (1, 2), (1, 3)],
        ];
        for cells in shapes {
            let geometry = measure_region(&region_from_cells(&cells));
            assert_eq!(
                geometry.perimeter % 2,
                0,
                "odd perimeter for cells {cells:?}"
            );
        }
    }
}
