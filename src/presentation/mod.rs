pub mod sign_up_form;
pub mod users_adapter;
