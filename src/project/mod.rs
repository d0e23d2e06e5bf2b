//! Facts about the project being migrated and the generated project skeleton.

pub mod info;
pub mod scaffold;

pub use info::{read_project_info, ProjectInfo};
pub use scaffold::Scaffold;
