mod aabb;
mod golden_section;
mod ray;
mod spherical;

pub use aabb::AABB;
pub use golden_section::{golden_section_search, is_valid_tolerance, required_steps, SearchInterval, INV_PHI, INV_PHI2};
pub use ray::{distance_to_ray, intersect_aabb};
pub use spherical::{ease_in_out, from_spherical, lerp, to_spherical, SphericalCoord};
