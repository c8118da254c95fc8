/// Entry of the loader queue to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFile {
    Previous,
    Next,
    Current,
    First,
    Last,
}

/// Scene loader working on a queue of files
pub trait Loader {
    /// Queue a file, returns its index in the queue
    fn add_file(&mut self, path: &str) -> usize;

    /// Load a queue entry, returns true on success
    fn load_file(&mut self, which: LoadFile) -> bool;
}
