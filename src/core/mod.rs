// Core algorithm exports
pub mod baseline;
pub mod da;
pub mod matcher;
pub mod scores;
pub mod strategy;
pub mod summary;

pub use baseline::run_baseline_matching;
pub use da::run_student_proposing_da;
pub use matcher::run_matching;
pub use scores::generate_random_scores;
pub use strategy::apply_safety_first_strategy;
pub use summary::summarize_results;
