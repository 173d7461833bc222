use crate::{model, Field, Model, Route, Schema};

model! {
    /// Membership of a user in a [`Group`](super::Group). Listed and removed
    /// through the group; never created or edited directly.
    pub struct GroupUser;
}

impl Model for GroupUser {
    const NAME: &'static str = "group_user";

    fn schema() -> Schema {
        Schema::new(
            Self::NAME,
            [
                Field::string("login").read_only(),
                Field::string("name").read_only(),
                Field::string("surname").read_only(),
            ],
        )
    }

    fn route() -> Route {
        Route::new("core/groups/:id:/users/").read_only()
    }
}

impl GroupUser {
    pub fn login(&self) -> Option<&str> {
        self.get_str("login")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn surname(&self) -> Option<&str> {
        self.get_str("surname")
    }
}
