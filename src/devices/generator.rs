use crate::config::GeneratorConfig;

/// Fuel-fired backup generator, dispatched last.
#[derive(Debug, Clone)]
pub struct Generator {
    /// Rated output in kilowatts.
    pub max_generator_kw: f64,
}

impl Generator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            max_generator_kw: config.max_generator_kw,
        }
    }

    /// Output when asked to cover `requested_kw`, limited to the rating.
    pub fn output_kw(&self, requested_kw: f64) -> f64 {
        requested_kw.clamp(0.0, self.max_generator_kw)
    }
}
