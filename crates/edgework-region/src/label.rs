//! Connected component labeling
//!
//! Scans a binary raster in row-major order and floods each newly found
//! foreground pixel's component with an explicit stack, numbering
//! components 1, 2, ... in discovery order.

use log::debug;

use edgework_core::{Raster, is_foreground};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    fn includes(self, dx: i64, dy: i64) -> bool {
        match self {
            ConnectivityType::FourWay => dx == 0 || dy == 0,
            ConnectivityType::EightWay => true,
        }
    }
}

/// Result of [`label_components`]
#[derive(Debug, Clone)]
pub struct Labeling {
    /// Number of components (the highest label assigned)
    pub count: u32,
    /// Label per pixel: 0 for background, `1..=count` for components
    pub labels: Raster,
}

/// Per-component summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStats {
    /// Component label
    pub label: u32,
    /// Number of pixels in the component
    pub pixel_count: u32,
    /// Bounding box as `(min_x, min_y, max_x, max_y)`, inclusive
    pub bounds: (u32, u32, u32, u32),
}

impl Labeling {
    /// Label at (x, y), 0 outside the raster
    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        self.labels.get_pixel(x, y).map_or(0, |v| v as u32)
    }

    /// Pixel count and bounding box of every component, ordered by label
    pub fn component_stats(&self) -> Vec<ComponentStats> {
        let mut stats: Vec<ComponentStats> = (1..=self.count)
            .map(|label| ComponentStats {
                label,
                pixel_count: 0,
                bounds: (u32::MAX, u32::MAX, 0, 0),
            })
            .collect();

        let (w, h) = self.labels.dimensions();
        for y in 0..h {
            for x in 0..w {
                let label = self.labels.get_pixel_unchecked(x, y) as u32;
                if label == 0 {
                    continue;
                }
                let s = &mut stats[(label - 1) as usize];
                s.pixel_count += 1;
                s.bounds.0 = s.bounds.0.min(x);
                s.bounds.1 = s.bounds.1.min(y);
                s.bounds.2 = s.bounds.2.max(x);
                s.bounds.3 = s.bounds.3.max(y);
            }
        }
        stats
    }
}

/// Label the connected foreground components of a binary raster.
///
/// Any sample `> 0` is foreground. A pixel is labeled as soon as it is
/// pushed onto the flood stack, so each pixel is visited once.
pub fn label_components(binary: &Raster, connectivity: ConnectivityType) -> Labeling {
    let (w, h) = binary.dimensions();
    let mut labels = binary.create_template();
    let mut count = 0u32;
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if !is_foreground(binary.get_pixel_unchecked(x, y))
                || labels.get_pixel_unchecked(x, y) != 0.0
            {
                continue;
            }

            count += 1;
            let label = count as f64;
            labels.set_pixel_unchecked(x, y, label);
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if (dx == 0 && dy == 0) || !connectivity.includes(dx, dy) {
                            continue;
                        }
                        let nx = cx as i64 + dx;
                        let ny = cy as i64 + dy;
                        if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                            continue;
                        }
                        let (nx, ny) = (nx as u32, ny as u32);
                        if is_foreground(binary.get_pixel_unchecked(nx, ny))
                            && labels.get_pixel_unchecked(nx, ny) == 0.0
                        {
                            labels.set_pixel_unchecked(nx, ny, label);
                            stack.push((nx, ny));
                        }
                    }
                }
            }
        }
    }

    debug!("label_components: {:?} count={}", connectivity, count);
    Labeling { count, labels }
}

/// Count the 8-connected foreground components of a binary raster.
pub fn count_components(binary: &Raster) -> u32 {
    label_components(binary, ConnectivityType::EightWay).count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Raster {
        let data: Vec<Vec<f64>> = rows
            .iter()
            .map(|r| r.chars().map(|c| if c == '#' { 255.0 } else { 0.0 }).collect())
            .collect();
        Raster::from_rows(&data).unwrap()
    }

    #[test]
    fn test_discovery_order() {
        let binary = grid(&[
            "..#..", //
            "#....", //
            ".....", //
            "...##",
        ]);
        let labeling = label_components(&binary, ConnectivityType::EightWay);
        assert_eq!(labeling.count, 3);
        assert_eq!(labeling.label_at(2, 0), 1);
        assert_eq!(labeling.label_at(0, 1), 2);
        assert_eq!(labeling.label_at(3, 3), 3);
        assert_eq!(labeling.label_at(4, 3), 3);
        assert_eq!(labeling.label_at(1, 1), 0);
    }

    #[test]
    fn test_diagonal_connectivity() {
        let binary = grid(&[
            "#..", //
            ".#.", //
            "..#",
        ]);
        assert_eq!(label_components(&binary, ConnectivityType::EightWay).count, 1);
        assert_eq!(label_components(&binary, ConnectivityType::FourWay).count, 3);
        assert_eq!(count_components(&binary), 1);
    }

    #[test]
    fn test_u_shape_single_label() {
        // The right arm is reached only through the bottom row.
        let binary = grid(&[
            "#...#", //
            "#...#", //
            "#####",
        ]);
        let labeling = label_components(&binary, ConnectivityType::FourWay);
        assert_eq!(labeling.count, 1);
        assert_eq!(labeling.label_at(4, 0), 1);
    }

    #[test]
    fn test_any_positive_is_foreground() {
        let binary = Raster::from_rows(&[[0.5, 0.0, 3.0]]).unwrap();
        assert_eq!(count_components(&binary), 2);
        let empty = Raster::from_rows(&[[0.0, -1.0]]).unwrap();
        assert_eq!(count_components(&empty), 0);
    }

    #[test]
    fn test_component_stats() {
        let binary = grid(&[
            "##...", //
            "#....", //
            "...##", //
            "...##",
        ]);
        let stats = label_components(&binary, ConnectivityType::EightWay).component_stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(
            stats[0],
            ComponentStats {
                label: 1,
                pixel_count: 3,
                bounds: (0, 0, 1, 1)
            }
        );
        assert_eq!(stats[1].pixel_count, 4);
        assert_eq!(stats[1].bounds, (3, 2, 4, 3));
    }
}
