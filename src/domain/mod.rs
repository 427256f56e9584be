//! Domain logic - pure release notes rules independent of git operations

pub mod change;
pub mod fragment;
pub mod notes;
pub mod rebuild;
pub mod state;
pub mod template;
pub mod version;

pub use change::Change;
pub use fragment::FragmentContext;
pub use notes::NotesDocument;
pub use rebuild::ChangeRange;
pub use state::ReleaseState;
pub use template::Template;
pub use version::{IncrementKind, ProjectVersion};
