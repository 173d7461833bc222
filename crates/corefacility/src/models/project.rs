use crate::{model, Field, FileManager, Model, Result, Route, Schema, Value};

model! {
    /// A research project. Its root group owns it; other groups get access
    /// through [`ProjectPermission`](super::ProjectPermission).
    pub struct Project;
}

impl Model for Project {
    const NAME: &'static str = "project";

    fn schema() -> Schema {
        Schema::new(
            Self::NAME,
            [
                Field::string("alias")
                    .required()
                    .length(1, 64)
                    .validate("slug", slug),
                Field::string("name").required().length(1, 64),
                Field::string("description").max_length(1024),
                Field::file("avatar"),
                Field::id("root_group").required(),
                Field::string("project_dir").read_only(),
                Field::string("unix_group").read_only(),
                Field::boolean("is_user_governor").read_only(),
            ],
        )
    }

    fn route() -> Route {
        Route::new("core/projects/").paginated()
    }
}

impl Project {
    pub fn alias(&self) -> Option<&str> {
        self.get_str("alias")
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) -> Result<()> {
        self.set("alias", alias.into())
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.set("name", name.into())
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        self.set("description", description.into())
    }

    pub fn root_group(&self) -> Option<i64> {
        self.get_i64("root_group")
    }

    pub fn set_root_group(&mut self, group: i64) -> Result<()> {
        self.set("root_group", group)
    }

    pub fn project_dir(&self) -> Option<&str> {
        self.get_str("project_dir")
    }

    pub fn unix_group(&self) -> Option<&str> {
        self.get_str("unix_group")
    }

    /// Whether the authorized user governs the root group.
    pub fn is_user_governor(&self) -> bool {
        self.get_bool("is_user_governor").unwrap_or(false)
    }

    pub fn avatar(&mut self) -> Result<FileManager<'_>> {
        self.file_manager("avatar")
    }
}

/// Aliases appear in paths and directory names.
fn slug(value: &Value) -> std::result::Result<(), String> {
    let Some(alias) = value.as_str() else {
        return Ok(());
    };

    let valid = alias
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err("only lowercase letters, digits, `-` and `_` are allowed".to_owned())
    }
}
