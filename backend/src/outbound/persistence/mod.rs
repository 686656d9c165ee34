//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Uniqueness and atomic toggles are pushed into SQL constraints and
//!   `ON CONFLICT` clauses rather than read-modify-write sequences.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures map onto each port's
//!   `Connection` and `Query` variants.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselCheckInRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/careerlog")).await?;
//! let check_ins = DieselCheckInRepository::new(pool.clone());
//! ```

mod diesel_achievement_repository;
mod diesel_basic_error_mapping;
mod diesel_check_in_repository;
mod diesel_daily_task_repository;
mod diesel_profile_repository;
mod diesel_roadmap_repository;
mod diesel_user_stats_repository;
mod json_serializers;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_achievement_repository::DieselAchievementRepository;
pub use diesel_check_in_repository::DieselCheckInRepository;
pub use diesel_daily_task_repository::DieselDailyTaskRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_roadmap_repository::{DieselRoadmapProgressRepository, DieselRoadmapRepository};
pub use diesel_user_stats_repository::DieselUserStatsRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
