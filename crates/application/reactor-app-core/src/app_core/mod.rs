pub mod events;
pub mod reducer;
pub mod requests;

pub use events::ShellEvent;
pub use reducer::reduce;
pub use requests::ViewModelEvent;
