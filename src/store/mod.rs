pub mod storage;
pub mod types;

pub use storage::{append_calculation, default_log_path, load_log, recent_calculations, save_log};
pub use types::{CalculationLog, CalculationRecord};
