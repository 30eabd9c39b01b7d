//! User entity <-> model mapper

use huddle_core::entities::User;
use huddle_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            name: model.name,
            email: model.email,
            image: model.image,
            created_at: model.created_at,
        }
    }
}
