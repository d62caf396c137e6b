pub mod overview;
pub mod project;
pub mod task;
pub mod user;

pub use overview::{ProjectWithTasks, UserOverview};
pub use project::{Project, ProjectInput};
pub use task::{Task, TaskInput};
pub use user::User;
