pub mod audit_logs;
pub mod comments;
pub mod favorites;
pub mod followships;
pub mod likes;
pub mod restaurants;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use comments::Entity as Comments;
pub use favorites::Entity as Favorites;
pub use followships::Entity as Followships;
pub use likes::Entity as Likes;
pub use restaurants::Entity as Restaurants;
pub use users::Entity as Users;
