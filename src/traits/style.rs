/// Default camera manipulation style receiving forwarded mouse events
pub trait InteractorStyle {
    fn on_middle_button_down(&mut self);

    fn on_middle_button_up(&mut self);

    fn set_camera_movement_disabled(&mut self, disabled: bool);
}
