pub mod animator;
pub mod clock;
pub mod context;
pub mod dispatcher;
pub mod event;
pub mod input_adapter;
pub mod key_bindings;
pub mod light;
pub mod recorder;
pub mod timer;

pub use animator::CameraAnimator;
pub use clock::Clock;
pub use context::{default_key_bindings, InteractorContext, EXIT_HOTKEY_SYM};
pub use dispatcher::{DropFilesCallback, EventObserver, Interactor, KeyPressCallback};
pub use event::{key_press_from_spec, InputEvent, Modifiers};
pub use input_adapter::WinitInputAdapter;
pub use key_bindings::{KeyBinding, KeyBindingTable, KeyCombo};
pub use light::LightCalibrator;
pub use recorder::EventRecorder;
pub use timer::{FixedHz, TimerId, TimerRegistry};
