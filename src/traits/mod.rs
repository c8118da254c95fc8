pub mod animation;
pub mod camera;
pub mod loader;
pub mod style;
pub mod window;

pub use animation::*;
pub use camera::*;
pub use loader::*;
pub use style::*;
pub use window::*;
