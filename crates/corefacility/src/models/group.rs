use crate::{model, Field, Model, Result, Route, Schema, Value};

model! {
    /// A set of users sharing access to projects.
    pub struct Group;
}

impl Model for Group {
    const NAME: &'static str = "group";

    fn schema() -> Schema {
        Schema::new(
            Self::NAME,
            [
                Field::string("name").required().length(1, 256),
                Field::json("governor")
                    .read_only()
                    .description("The user who manages the group"),
            ],
        )
    }

    fn route() -> Route {
        Route::new("core/groups/").paginated()
    }
}

impl Group {
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.set("name", name.into())
    }

    /// The governor as the server describes it, usually a short user record.
    pub fn governor(&self) -> Option<&Value> {
        self.get("governor")
    }
}
