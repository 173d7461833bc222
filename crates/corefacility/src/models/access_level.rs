use crate::{model, Client, Field, Model, Query, Result, Route, Schema};

model! {
    /// A named set of rights, e.g. `full` or `data_view`.
    pub struct AccessLevel;
}

impl Model for AccessLevel {
    const NAME: &'static str = "access_level";

    fn schema() -> Schema {
        Schema::new(
            Self::NAME,
            [
                Field::string("alias").read_only(),
                Field::string("name").read_only(),
            ],
        )
    }

    fn route() -> Route {
        Route::new("core/access-levels/").read_only()
    }
}

impl AccessLevel {
    /// Access levels of one kind (`project` or `app`). Answered from the
    /// client cache after the first request.
    pub async fn list(client: &Client, kind: &str) -> Result<Vec<AccessLevel>> {
        client
            .find_cached::<AccessLevel>(Query::new().param("type", kind))
            .await
    }

    pub fn alias(&self) -> Option<&str> {
        self.get_str("alias")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }
}
