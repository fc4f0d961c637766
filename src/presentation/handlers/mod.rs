mod analyze;
mod health;
mod results;
mod root;

pub use analyze::{AnalyzeResponse, ErrorResponse, analyze_handler};
pub use health::health_handler;
pub use results::{ResultResponse, results_handler};
pub use root::root_handler;
