use image::DynamicImage;

use crate::domain::{models::user::User, services::image_pipeline};

/// Receives row clicks from [`UsersAdapter`]
pub trait UserListener {
    fn on_user_clicked(&self, user: &User);
}

impl<F: Fn(&User)> UserListener for F {
    fn on_user_clicked(&self, user: &User) {
        self(user)
    }
}

/// Display data for one list row
#[derive(Debug, Clone)]
pub struct UserRow {
    pub name: String,
    pub email: String,
    pub image: DynamicImage,
}

/// Binds stored users to scrollable list rows
pub struct UsersAdapter<L: UserListener> {
    users: Vec<User>,
    listener: L,
}

impl<L: UserListener> UsersAdapter<L> {
    pub fn new(users: Vec<User>, listener: L) -> Self {
        Self { users, listener }
    }

    pub fn item_count(&self) -> usize {
        self.users.len()
    }

    /// Row contents at `position`. A stored image that cannot be decoded is
    /// replaced by the placeholder.
    pub fn bind(&self, position: usize) -> Option<UserRow> {
        let user = self.users.get(position)?;
        Some(UserRow {
            name: user.name().to_string(),
            email: user.email().to_string(),
            image: image_pipeline::decode_or_placeholder(user.image().as_str()),
        })
    }

    /// Forward a tap on `position` to the listener. Returns false when the
    /// position is out of range.
    pub fn click(&self, position: usize) -> bool {
        match self.users.get(position) {
            Some(user) => {
                self.listener.on_user_clicked(user);
                true
            }
            None => false,
        }
    }
}
