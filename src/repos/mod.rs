/*
 * Responsibility
 * - store の境界 (UserStore / CourseStore) と実装 (Postgres, in-memory)
 * - store 固有のエラーはここで RepoError に翻訳する
 */
pub mod course_repo;
pub mod error;
pub mod memory;
pub mod pg;
pub mod user_repo;

pub use course_repo::CourseStore;
pub use user_repo::UserStore;
