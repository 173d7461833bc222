//! Entity types of the corefacility core application.

mod access_level;
pub use access_level::AccessLevel;

mod group;
pub use group::Group;

mod group_user;
pub use group_user::GroupUser;

mod project;
pub use project::Project;

mod project_permission;
pub use project_permission::ProjectPermission;

mod user;
pub use user::User;
