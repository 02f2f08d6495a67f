use super::evolution_engine::ProgressCallback;

/// Discards all progress events.
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64) {}
}

/// Reports generations through the `log` facade.
pub struct LogProgress {
    label: &'static str,
}

impl LogProgress {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl ProgressCallback for LogProgress {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("[{}] Generation {} starting", self.label, generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64) {
        log::debug!(
            "[{}] Generation {} complete. Best fitness: {:.4}",
            self.label,
            generation + 1,
            best_fitness
        );
    }
}

/// Records best fitness per generation, mostly for tests and tuning.
#[derive(Debug, Default)]
pub struct FitnessHistory {
    pub best: Vec<f64>,
}

impl ProgressCallback for FitnessHistory {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, best_fitness: f64) {
        self.best.push(best_fitness);
    }
}
