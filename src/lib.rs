pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod headless;
pub mod image;
pub mod math;
pub mod options;
pub mod traits;

pub use camera::CameraState;
pub use config::{InteractorConfig, LightCalibrationConfig};
pub use crate::core::{Interactor, InteractorContext, InputEvent, KeyBindingTable, Modifiers, TimerId};
pub use error::{InteractorError, Result};
pub use options::{OptionValue, Options};
