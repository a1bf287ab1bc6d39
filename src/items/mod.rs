mod history;

pub use history::{DEFAULT_HISTORY_LIMIT, HistoryItem, HistoryLog};
