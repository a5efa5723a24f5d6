use crate::artifacts::core::options::CompareOptions;
use std::sync::Arc;

/// Entry point for comparison requests.
///
/// Holds the options shared, read-only, by every file compared within a
/// request; the operations themselves live in `commands`.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    options: Arc<CompareOptions>,
}

impl Comparison {
    pub fn new(options: CompareOptions) -> Self {
        Comparison {
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    pub fn shared_options(&self) -> Arc<CompareOptions> {
        Arc::clone(&self.options)
    }
}
