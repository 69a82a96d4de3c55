// THEORY:
// The `RegionLabeler` is the engine of the spatial grouping layer. It performs
// connected-component labeling over a classified grid: every maximal group of
// edge-adjacent, same-category cells becomes one `Region`.
//
// Key architectural principles & algorithm steps:
// 1.  **Row-major seed scan**: the grid is scanned from (0,0) in row-major
//     order. Every unvisited cell with a non-None category seeds a new region.
//     Scanning row-major fixes the region enumeration order, which makes whole
//     runs reproducible — the same image always yields the same region ids.
// 2.  **Breadth-first growth**: from each seed the labeler expands outward
//     through a queue, adding unvisited neighbors whose category matches the
//     seed exactly. A `visited` grid guarantees every cell is claimed by at
//     most one region.
// 3.  **4-connectivity, fixed**: only the four edge-sharing neighbors are ever
//     merged; diagonal contact does not connect cells. This choice is
//     load-bearing: the perimeter measurement counts exposed edges, and only
//     under edge-sharing adjacency do area and perimeter agree on what an
//     "edge" is. 8-connectivity would make the perimeter ill-defined.
// 4.  **Data aggregation**: once a region stops growing, its bounding box is
//     folded from the collected cells and the result is packaged as an
//     immutable `Region` for the geometry stage.
// 5.  **Stateless utility**: `label_regions` is a pure function of one grid.
//     It holds no memory between invocations.

use crate::core_modules::classifier::{Category, ClassifiedGrid};
use crate::core_modules::region::{Point, Region};

pub mod region_labeler {
    use super::*;
    use std::collections::VecDeque;

    /// The four edge-sharing neighbor offsets. The geometry measurer counts
    /// exposed edges over this same set, keeping area and perimeter consistent.
    pub const NEIGHBOR_OFFSETS_4: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

    /// The main function of the spatial grouping layer.
    /// Scans the grid row-major and grows one region per unvisited colored cell.
    pub fn label_regions(grid: &ClassifiedGrid) -> Vec<Region> {
        let grid_width = grid.width() as usize;
        let grid_height = grid.height() as usize;

        let mut visited = vec![vec![false; grid_width]; grid_height];
        let mut regions: Vec<Region> = Vec::new();
        let mut region_id_counter = 0u64;

        for y in 0..grid_height {
            for x in 0..grid_width {
                if visited[y][x] {
                    continue;
                }
                let category = grid.category_at(x as u32, y as u32);
                if category == Category::None {
                    visited[y][x] = true;
                    continue;
                }

                let seed = Point {
                    x: x as u32,
                    y: y as u32,
                };
                let region =
                    grow_region_from_seed(seed, category, grid, &mut visited, region_id_counter);
                regions.push(region);
                region_id_counter += 1;
            }
        }

        regions
    }

    /// Performs a breadth-first search (BFS) to collect every cell connected
    /// to the seed through same-category edge neighbors.
    fn grow_region_from_seed(
        seed: Point,
        category: Category,
        grid: &ClassifiedGrid,
        visited: &mut [Vec<bool>],
        region_id: u64,
    ) -> Region {
        let grid_width = grid.width() as i32;
        let grid_height = grid.height() as i32;

        let mut cells: Vec<Point> = Vec::new();
        let mut queue: VecDeque<Point> = VecDeque::new();
        queue.push_back(seed);
        visited[seed.y as usize][seed.x as usize] = true;

        while let Some(current) = queue.pop_front() {
            cells.push(current);

            for (dx, dy) in &NEIGHBOR_OFFSETS_4 {
                let nx = current.x as i32 + dx;
                let ny = current.y as i32 + dy;

                if nx >= 0 && nx < grid_width && ny >= 0 && ny < grid_height {
                    let nx_u = nx as usize;
                    let ny_u = ny as usize;

                    if !visited[ny_u][nx_u]
                        && grid.category_at(nx as u32, ny as u32) == category
                    {
                        visited[ny_u][nx_u] = true;
                        queue.push_back(Point {
                            x: nx as u32,
                            y: ny as u32,
                        });
                    }
                }
            }
        }

        // --- Data Aggregation ---
        // Fold the bounding box from the collected cells.
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        for cell in &cells {
            min_x = min_x.min(cell.x);
            min_y = min_y.min(cell.y);
            max_x = max_x.max(cell.x);
            max_y = max_y.max(cell.y);
        }

        Region {
            id: region_id,
            category,
            cells,
            bounding_box: (Point { x: min_x, y: min_y }, Point { x: max_x, y: max_y }),
        }
    }
}
