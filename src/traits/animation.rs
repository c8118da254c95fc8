/// Scene animation playback
pub trait AnimationManager {
    fn start_animation(&mut self);

    fn stop_animation(&mut self);

    fn toggle_animation(&mut self) {
        if self.is_playing() {
            self.stop_animation();
        } else {
            self.start_animation();
        }
    }

    fn is_playing(&self) -> bool;
}
