use crate::{model, Field, Model, Result, Route, Schema};

model! {
    /// Access of one group to a [`Project`](super::Project).
    pub struct ProjectPermission;
}

impl Model for ProjectPermission {
    const NAME: &'static str = "project_permission";

    fn schema() -> Schema {
        Schema::new(
            Self::NAME,
            [
                Field::id("group_id").required(),
                Field::id("access_level").required(),
            ],
        )
    }

    fn route() -> Route {
        Route::new("core/projects/:id:/permissions/")
    }
}

impl ProjectPermission {
    pub fn group_id(&self) -> Option<i64> {
        self.get_i64("group_id")
    }

    pub fn set_group_id(&mut self, group: i64) -> Result<()> {
        self.set("group_id", group)
    }

    pub fn access_level(&self) -> Option<i64> {
        self.get_i64("access_level")
    }

    pub fn set_access_level(&mut self, level: i64) -> Result<()> {
        self.set("access_level", level)
    }
}
