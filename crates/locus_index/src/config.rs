use locus_core::prelude::*;

use thiserror::Error;

/// Construction parameters of a `HashTree`.
///
/// The parameters are fixed for the lifetime of a tree. Use `HashTree::reset` to change them, which also clears the tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct HashTreeConfig {
    /// The number of levels in the tree, including the root. Values beyond what fits in a location code are clamped.
    pub max_layers: u32,
    /// The edge length of the finest cells in world units.
    pub cell_size: u32,
    /// Shifts the indexed region toward negative coordinates by this many finest cells on every axis. At most half the
    /// finest cells along one axis of the root, so the world origin stays on the region's boundary or inside it.
    pub center_offset: u32,
}

impl HashTreeConfig {
    pub const fn quadtree_default() -> Self {
        Self {
            max_layers: 16,
            cell_size: 32,
            center_offset: 32,
        }
    }

    pub const fn octree_default() -> Self {
        Self {
            max_layers: 11,
            cell_size: 32,
            center_offset: 32,
        }
    }

    /// Checks that the parameters can be used without clamping for points of type `PointN<N>`.
    pub fn validate<N>(&self) -> Result<(), ConfigError>
    where
        PointN<N>: TreePoint,
    {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.max_layers == 0 {
            return Err(ConfigError::ZeroLayers);
        }
        let max = PointN::<N>::MAX_DEPTH + 1;
        if self.max_layers > max {
            return Err(ConfigError::TooManyLayers {
                requested: self.max_layers,
                max,
            });
        }
        let max_offset = half_root_cells(self.max_layers - 1);
        if self.center_offset > max_offset {
            return Err(ConfigError::CenterOffsetTooLarge {
                requested: self.center_offset,
                max: max_offset,
            });
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be at least 1")]
    ZeroCellSize,
    #[error("a tree needs at least 1 layer")]
    ZeroLayers,
    #[error("requested {requested} layers but location codes only fit {max}")]
    TooManyLayers { requested: u32, max: u32 },
    #[error("center offset of {requested} cells leaves the origin outside the root, which is {max} cells from its center")]
    CenterOffsetTooLarge { requested: u32, max: u32 },
}

fn half_root_cells(max_depth: u32) -> u32 {
    (1u32 << max_depth) / 2
}

/// The mapping between world space and the integer grid of the finest cells, resolved from a `HashTreeConfig`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTransform {
    cell_size: f32,
    max_depth: u32,
    max_grid: f32,
    position_offset: f32,
    root_center: f32,
    root_half_extent: f32,
}

impl GridTransform {
    /// Resolves `config` for points of type `PointN<N>`, clamping every parameter into its valid range.
    pub fn new<N>(config: &HashTreeConfig) -> Self
    where
        PointN<N>: TreePoint,
    {
        let cell_size = config.cell_size.max(1);
        let max_depth = (config.max_layers.max(1) - 1).min(PointN::<N>::MAX_DEPTH);
        let root_cells = 1u32 << max_depth;
        let half_cells = half_root_cells(max_depth);
        let center_offset = config.center_offset.min(half_cells);

        Self {
            cell_size: cell_size as f32,
            max_depth,
            max_grid: (root_cells - 1) as f32,
            position_offset: (half_cells + center_offset) as f32,
            root_center: -(center_offset as f32) * cell_size as f32,
            root_half_extent: half_cells as f32 * cell_size as f32,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The depth of the finest cells. The root is at depth 0.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The greatest grid coordinate that is still inside the indexed region.
    #[inline]
    pub fn max_grid(&self) -> f32 {
        self.max_grid
    }

    /// Maps a world-space point into grid space.
    #[inline]
    pub fn world_to_grid<N>(&self, p: PointN<N>) -> PointN<N>
    where
        PointN<N>: TreePoint,
    {
        p / self.cell_size + PointN::fill(self.position_offset)
    }

    /// Returns `true` iff every component of grid point `p` is in `[0, max_grid]`. NaN is never in range.
    #[inline]
    pub fn grid_contains<N>(&self, p: PointN<N>) -> bool
    where
        PointN<N>: TreePoint,
    {
        let max_grid = self.max_grid;

        p.all_components(|c| (0.0..=max_grid).contains(&c))
    }

    /// The world-space extent covered by the root cell.
    #[inline]
    pub fn root_extent<N>(&self) -> ExtentN<N>
    where
        PointN<N>: TreePoint,
    {
        ExtentN::from_center_and_half_extent(
            PointN::fill(self.root_center),
            PointN::fill(self.root_half_extent),
        )
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_resolve_like_original_trees() {
        let quad = GridTransform::new::<[f32; 2]>(&HashTreeConfig::quadtree_default());
        assert_eq!(quad.max_depth(), 15);
        assert_eq!(quad.max_grid(), 32767.0);

        let oct = GridTransform::new::<[f32; 3]>(&HashTreeConfig::octree_default());
        assert_eq!(oct.max_depth(), 10);
        assert_eq!(oct.max_grid(), 1023.0);
        assert_eq!(
            oct.root_extent::<[f32; 3]>(),
            Extent3f::from_center_and_half_extent(
                PointN([-32.0 * 32.0; 3]),
                PointN([512.0 * 32.0; 3])
            )
        );
    }

    #[test]
    fn root_extent_maps_onto_grid_range() {
        let t = GridTransform::new::<[f32; 3]>(&HashTreeConfig::octree_default());
        let root = t.root_extent::<[f32; 3]>();

        assert_eq!(t.world_to_grid(root.minimum), PointN([0.0; 3]));
        assert_eq!(t.world_to_grid(root.max()), PointN([1024.0; 3]));
        assert!(t.grid_contains(t.world_to_grid(PointN([0.0; 3]))));
        assert!(!t.grid_contains(t.world_to_grid(root.max())));
        assert!(!t.grid_contains(PointN([f32::NAN, 0.0, 0.0])));
    }

    #[test]
    fn out_of_range_parameters_are_clamped() {
        let config = HashTreeConfig {
            max_layers: 0,
            cell_size: 0,
            center_offset: 0,
        };
        let t = GridTransform::new::<[f32; 2]>(&config);
        assert_eq!(t.cell_size(), 1.0);
        assert_eq!(t.max_depth(), 0);

        let config = HashTreeConfig {
            max_layers: 100,
            ..HashTreeConfig::quadtree_default()
        };
        assert_eq!(GridTransform::new::<[f32; 2]>(&config).max_depth(), 15);
        assert_eq!(GridTransform::new::<[f32; 3]>(&config).max_depth(), 10);
    }

    #[test]
    fn huge_center_offset_is_clamped_to_root_boundary() {
        let config = HashTreeConfig {
            center_offset: u32::MAX,
            ..HashTreeConfig::quadtree_default()
        };
        let t = GridTransform::new::<[f32; 2]>(&config);
        let root = t.root_extent::<[f32; 2]>();

        assert_eq!(root.max(), PointN([0.0; 2]));
        assert_eq!(t.world_to_grid(root.minimum), PointN([0.0; 2]));
        assert!(!t.grid_contains(t.world_to_grid(PointN([0.0; 2]))));
        assert!(t.grid_contains(t.world_to_grid(PointN([-32.0; 2]))));
    }

    #[test]
    fn validation_rejects_what_would_be_clamped() {
        assert_eq!(HashTreeConfig::quadtree_default().validate::<[f32; 2]>(), Ok(()));
        assert_eq!(HashTreeConfig::octree_default().validate::<[f32; 3]>(), Ok(()));
        assert_eq!(
            HashTreeConfig::quadtree_default().validate::<[f32; 3]>(),
            Err(ConfigError::TooManyLayers {
                requested: 16,
                max: 11
            })
        );
        assert_eq!(
            HashTreeConfig {
                cell_size: 0,
                ..HashTreeConfig::octree_default()
            }
            .validate::<[f32; 3]>(),
            Err(ConfigError::ZeroCellSize)
        );
        assert_eq!(
            HashTreeConfig {
                max_layers: 0,
                ..HashTreeConfig::octree_default()
            }
            .validate::<[f32; 3]>(),
            Err(ConfigError::ZeroLayers)
        );
        assert_eq!(
            HashTreeConfig {
                center_offset: u32::MAX,
                ..HashTreeConfig::quadtree_default()
            }
            .validate::<[f32; 2]>(),
            Err(ConfigError::CenterOffsetTooLarge {
                requested: u32::MAX,
                max: 16384
            })
        );
        assert_eq!(
            HashTreeConfig {
                center_offset: 512,
                ..HashTreeConfig::octree_default()
            }
            .validate::<[f32; 3]>(),
            Ok(())
        );
    }
}
