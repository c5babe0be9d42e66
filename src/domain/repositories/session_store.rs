use crate::domain::error::SessionError;

pub const KEY_IS_SIGNED_IN: &str = "is_signed_in";
pub const KEY_NAME: &str = "name";
pub const KEY_IMAGE: &str = "image";

/// Local key-value persistence for the signed-in session
pub trait SessionStore: Send + Sync {
    fn put_bool(&self, key: &str, value: bool) -> Result<(), SessionError>;

    fn put_string(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Missing keys read as `false`
    fn get_bool(&self, key: &str) -> Result<bool, SessionError>;

    fn get_string(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Drop every stored key
    fn clear(&self) -> Result<(), SessionError>;
}
