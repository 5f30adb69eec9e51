//! Account management handlers.

mod create_user;
mod delete_user;
mod update_user;
mod user_queries;

pub use create_user::{CreateUserCommand, CreateUserHandler};
pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use update_user::{UpdateUserCommand, UpdateUserHandler};
pub use user_queries::{ListUsersQuery, UserQueryHandler};
