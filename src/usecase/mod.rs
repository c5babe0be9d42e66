pub mod session_usecase;
pub mod sign_up_usecase;
