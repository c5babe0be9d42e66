pub mod encoded_image;
pub mod user;
pub mod validation;
