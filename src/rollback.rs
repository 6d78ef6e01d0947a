/// Undo steps for a mount that is still being assembled. If it is dropped
/// before `commit`, the steps run newest first.
#[derive(Default)]
pub struct Rollback {
    steps: Vec<(&'static str, Box<dyn FnOnce()>)>,
}

impl Rollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &'static str, undo: impl FnOnce() + 'static) {
        self.steps.push((label, Box::new(undo)));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The mount succeeded; keep everything.
    pub fn commit(mut self) {
        self.steps.clear();
    }
}

impl Drop for Rollback {
    fn drop(&mut self) {
        while let Some((label, undo)) = self.steps.pop() {
            log::debug!("[mount] rolling back {}", label);
            undo();
        }
    }
}
