//! Application Layer
//!
//! Use cases and application services.

pub mod attempts;
pub mod final_report;
pub mod manage_users;
pub mod users;

// Re-exports
pub use manage_users::{
    DeleteUserUseCase, ListUsersInput, ListUsersOutput, ListUsersUseCase, UserDetail,
    UserDetailUseCase,
};
pub use attempts::{
    ListAttemptsUseCase, MAX_DURATION_MS, RecordAttemptInput, RecordAttemptUseCase,
};
pub use final_report::{GenerateReportUseCase, GetReportUseCase};
pub use users::{
    CreateUserInput, CreateUserUseCase, GetUserUseCase, UpdateLanguageUseCase,
    UpdateProgressUseCase,
};
