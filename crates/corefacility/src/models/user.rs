use crate::{model, FileManager, Field, Model, PasswordManager, Result, Route, Schema, Value};

model! {
    /// A person who can log in to the platform.
    pub struct User;
}

impl Model for User {
    const NAME: &'static str = "user";

    fn schema() -> Schema {
        Schema::new(
            Self::NAME,
            [
                Field::string("login")
                    .required()
                    .length(1, 100)
                    .description("Login used to sign in"),
                Field::string("name").max_length(100),
                Field::string("surname").max_length(100),
                Field::string("email")
                    .max_length(254)
                    .validate("email", email_address),
                Field::string("phone").max_length(20),
                Field::boolean("is_locked").default(false),
                Field::boolean("is_superuser").default(false),
                Field::boolean("is_support").read_only(),
                Field::string("unix_group").read_only(),
                Field::string("home_dir").read_only(),
                Field::file("avatar"),
                Field::password("password"),
            ],
        )
    }

    fn route() -> Route {
        Route::new("core/users/").paginated()
    }
}

impl User {
    pub fn login(&self) -> Option<&str> {
        self.get_str("login")
    }

    pub fn set_login(&mut self, login: impl Into<String>) -> Result<()> {
        self.set("login", login.into())
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.set("name", name.into())
    }

    pub fn surname(&self) -> Option<&str> {
        self.get_str("surname")
    }

    pub fn set_surname(&mut self, surname: impl Into<String>) -> Result<()> {
        self.set("surname", surname.into())
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
        self.set("email", email.into())
    }

    pub fn phone(&self) -> Option<&str> {
        self.get_str("phone")
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<()> {
        self.set("phone", phone.into())
    }

    pub fn is_locked(&self) -> bool {
        self.get_bool("is_locked").unwrap_or(false)
    }

    pub fn set_locked(&mut self, locked: bool) -> Result<()> {
        self.set("is_locked", locked)
    }

    pub fn is_superuser(&self) -> bool {
        self.get_bool("is_superuser").unwrap_or(false)
    }

    pub fn set_superuser(&mut self, superuser: bool) -> Result<()> {
        self.set("is_superuser", superuser)
    }

    /// Support accounts are managed by the server and cannot log in.
    pub fn is_support(&self) -> bool {
        self.get_bool("is_support").unwrap_or(false)
    }

    pub fn unix_group(&self) -> Option<&str> {
        self.get_str("unix_group")
    }

    pub fn home_dir(&self) -> Option<&str> {
        self.get_str("home_dir")
    }

    pub fn avatar(&mut self) -> Result<FileManager<'_>> {
        self.file_manager("avatar")
    }

    pub fn password(&mut self) -> Result<PasswordManager<'_>> {
        self.password_manager("password")
    }
}

fn email_address(value: &Value) -> std::result::Result<(), String> {
    let Some(address) = value.as_str() else {
        return Ok(());
    };

    if address.is_empty() {
        return Ok(());
    }

    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("enter a valid email address".to_owned()),
    }
}
