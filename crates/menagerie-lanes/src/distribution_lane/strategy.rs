// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use menagerie_core::config::DistributionKind;
use menagerie_core::math::{Vec3, PI, TAU};
use rand::Rng;

/// A spatial layout together with the parameters derived from the spacing scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionStrategy {
    /// Each coordinate uniform in `[-half_extent, +half_extent]`.
    Random {
        /// Half the side of the cube models are scattered in.
        half_extent: f32,
    },
    /// A cubic grid of side `ceil(cbrt(total))`, centred on the origin.
    Grid3d {
        /// Distance between neighbouring cells.
        cell_size: f32,
    },
    /// Equal-area spiral points on a sphere.
    Sphere {
        /// Sphere radius; every position lies exactly on it.
        radius: f32,
    },
    /// One turn around a vertical cylinder, rising with the index.
    Cylinder {
        /// Cylinder radius.
        radius: f32,
        /// Vertical extent, centred on `y = 0`.
        height: f32,
    },
    /// A helix whose radius grows with the index.
    Spiral {
        /// Radius reached by the last index.
        max_radius: f32,
        /// Vertical extent, centred on `y = 0`.
        height: f32,
        /// Total angle swept from first to last index.
        sweep: f32,
    },
    /// A sine wave along X with alternating Z rows.
    Wave {
        /// Distance between neighbours along X, and the wave amplitude.
        spacing: f32,
    },
}

impl DistributionStrategy {
    /// Builds the strategy for `kind` scaled by `spacing`.
    pub fn from_kind(kind: DistributionKind, spacing: f32) -> Self {
        match kind {
            DistributionKind::Random => Self::Random {
                half_extent: spacing,
            },
            DistributionKind::Grid3d => Self::Grid3d { cell_size: spacing },
            DistributionKind::Sphere => Self::Sphere {
                radius: spacing * 2.0,
            },
            DistributionKind::Cylinder => Self::Cylinder {
                radius: spacing * 2.0,
                height: spacing * 4.0,
            },
            DistributionKind::Spiral => Self::Spiral {
                max_radius: spacing * 4.0,
                height: spacing * 4.0,
                sweep: PI * 8.0,
            },
            DistributionKind::Wave => Self::Wave { spacing },
        }
    }

    /// The name this strategy is selected by.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Random { .. } => DistributionKind::Random,
            Self::Grid3d { .. } => DistributionKind::Grid3d,
            Self::Sphere { .. } => DistributionKind::Sphere,
            Self::Cylinder { .. } => DistributionKind::Cylinder,
            Self::Spiral { .. } => DistributionKind::Spiral,
            Self::Wave { .. } => DistributionKind::Wave,
        }
    }

    /// Computes the rest position of model `index` in a population of `total`.
    ///
    /// Only `Random` consumes `rng`. A `total` of zero is treated as one.
    pub fn place<R: Rng + ?Sized>(&self, index: usize, total: usize, rng: &mut R) -> Vec3 {
        let total = total.max(1);
        let i = index as f32;
        let n = total as f32;
        let t = i / n;

        match *self {
            Self::Random { half_extent } => Vec3::new(
                (rng.gen::<f32>() - 0.5) * half_extent * 2.0,
                (rng.gen::<f32>() - 0.5) * half_extent * 2.0,
                (rng.gen::<f32>() - 0.5) * half_extent * 2.0,
            ),
            Self::Grid3d { cell_size } => {
                let side = grid_side(total);
                let half = side as f32 / 2.0;
                let x = (index % side) as f32;
                let y = ((index / side) % side) as f32;
                let z = (index / (side * side)) as f32;
                Vec3::new(x - half, y - half, z - half) * cell_size
            }
            Self::Sphere { radius } => {
                let phi = (-1.0 + 2.0 * t).clamp(-1.0, 1.0).acos();
                let theta = (n * PI).sqrt() * phi;
                Vec3::new(
                    radius * theta.cos() * phi.sin(),
                    radius * theta.sin() * phi.sin(),
                    radius * phi.cos(),
                )
            }
            Self::Cylinder { radius, height } => {
                let angle = t * TAU;
                Vec3::new(radius * angle.cos(), (t - 0.5) * height, radius * angle.sin())
            }
            Self::Spiral {
                max_radius,
                height,
                sweep,
            } => {
                let radius = t * max_radius;
                let angle = t * sweep;
                Vec3::new(radius * angle.cos(), (t - 0.5) * height, radius * angle.sin())
            }
            Self::Wave { spacing } => {
                let x = (i - n / 2.0) * spacing;
                let z = (index % 2) as f32 * spacing - spacing / 2.0;
                Vec3::new(x, (x * 0.5).sin() * spacing, z)
            }
        }
    }
}

/// Side length of the smallest cube holding `total` cells.
fn grid_side(total: usize) -> usize {
    let mut side = (total as f64).cbrt().ceil() as usize;
    // cbrt can land a hair above an exact cube.
    while side > 1 && (side - 1).pow(3) >= total {
        side -= 1;
    }
    side.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_grid_side() {
        assert_eq!(grid_side(1), 1);
        assert_eq!(grid_side(8), 2);
        assert_eq!(grid_side(9), 3);
        assert_eq!(grid_side(27), 3);
        assert_eq!(grid_side(64), 4);
        assert_eq!(grid_side(500), 8);
    }

    #[test]
    fn test_sphere_positions_lie_on_radius() {
        let strategy = DistributionStrategy::from_kind(DistributionKind::Sphere, 6.0);
        let mut rng = rng();
        for total in [1, 2, 7, 20, 500] {
            for index in 0..total {
                let p = strategy.place(index, total, &mut rng);
                assert_relative_eq!(p.length(), 12.0, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_cylinder_positions_keep_horizontal_radius() {
        let strategy = DistributionStrategy::from_kind(DistributionKind::Cylinder, 2.0);
        let mut rng = rng();
        for index in 0..10 {
            let p = strategy.place(index, 10, &mut rng);
            assert_relative_eq!((p.x * p.x + p.z * p.z).sqrt(), 4.0, epsilon = 1e-4);
            assert!(p.y >= -4.0 && p.y < 4.0);
        }
    }

    #[test]
    fn test_grid_is_centred() {
        // --- ARRANGE ---
        let strategy = DistributionStrategy::from_kind(DistributionKind::Grid3d, 1.0);
        let mut rng = rng();

        // --- ACT ---
        let positions: Vec<Vec3> = (0..8).map(|i| strategy.place(i, 8, &mut rng)).collect();

        // --- ASSERT ---
        let sum = positions.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
        let centroid = sum / positions.len() as f32;
        assert!(centroid.abs_diff_eq(Vec3::splat(-0.5), 1e-5));
        assert_eq!(positions[0], Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(positions[7], Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_wave_alternates_rows_by_parity() {
        let strategy = DistributionStrategy::from_kind(DistributionKind::Wave, 4.0);
        let mut rng = rng();
        for index in 0..6 {
            let p = strategy.place(index, 6, &mut rng);
            let expected_z = if index % 2 == 0 { -2.0 } else { 2.0 };
            assert_relative_eq!(p.z, expected_z);
            assert_relative_eq!(p.x, (index as f32 - 3.0) * 4.0);
        }
    }

    #[test]
    fn test_spiral_starts_at_the_axis() {
        let strategy = DistributionStrategy::from_kind(DistributionKind::Spiral, 1.0);
        let p = strategy.place(0, 10, &mut rng());
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.z, 0.0);
        assert_relative_eq!(p.y, -2.0);
    }

    #[test]
    fn test_random_stays_inside_cube() {
        let strategy = DistributionStrategy::from_kind(DistributionKind::Random, 3.0);
        let mut rng = rng();
        for index in 0..200 {
            let p = strategy.place(index, 200, &mut rng);
            for c in [p.x, p.y, p.z] {
                assert!((-3.0..=3.0).contains(&c), "coordinate {c} escaped the cube");
            }
        }
    }

    #[test]
    fn test_zero_total_is_treated_as_one() {
        let strategy = DistributionStrategy::from_kind(DistributionKind::Cylinder, 1.0);
        let mut rng = rng();
        assert_eq!(strategy.place(0, 0, &mut rng), strategy.place(0, 1, &mut rng));
    }

    #[test]
    fn test_kind_round_trips_through_strategy() {
        for kind in DistributionKind::ALL {
            assert_eq!(DistributionStrategy::from_kind(kind, 1.0).kind(), kind);
        }
    }
}
