pub mod files;
pub mod settings;
pub mod store;

pub use files::{atomic_write, ensure_data_dir, get_data_dir, init_data_dir, init_local_data_dir, settings_file};
pub use settings::{load_settings, save_settings, Settings};
pub use store::{FileStore, MemoryStore, Store, TASKS_KEY, UNAVAILABLE_DAYS_KEY};
