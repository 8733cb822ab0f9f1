pub mod agenda;

pub use agenda::{render_agenda, write_agenda};
