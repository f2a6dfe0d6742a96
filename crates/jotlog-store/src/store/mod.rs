pub mod atomic_writer;
pub mod file;
pub mod preferences;

pub use atomic_writer::AtomicWriter;
pub use file::FileLogStore;
pub use preferences::PreferencesLogStore;
