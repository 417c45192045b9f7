//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs used by the repository layer
//!
//! Counter columns (`like_count`, `subscriber_count`) appear on the entity
//! structs for reads but on no update DTO: the toggle engine is the single
//! writer.

pub mod cleanup;
pub mod comment;
pub mod playlist;
pub mod relation;
pub mod tweet;
pub mod user;
pub mod video;
