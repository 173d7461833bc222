//! Fields that are not sent with the record but through a request of their
//! own, such as uploaded files and generated passwords.

use crate::{
    transport::{Body, FileUpload, Method},
    Entity, Error, ManagedKind, Result, Value,
};

impl Entity {
    /// The manager of a file field.
    pub fn file_manager(&mut self, field: &str) -> Result<FileManager<'_>> {
        let field = self.managed_field(field, ManagedKind::File)?;
        Ok(FileManager {
            entity: self,
            field,
        })
    }

    /// The manager of a password field.
    pub fn password_manager(&mut self, field: &str) -> Result<PasswordManager<'_>> {
        let field = self.managed_field(field, ManagedKind::Password)?;
        Ok(PasswordManager {
            entity: self,
            field,
        })
    }

    fn managed_field(&self, name: &str, kind: ManagedKind) -> Result<&'static str> {
        match self.def().schema().field(name) {
            Some(field) if field.managed_kind() == Some(kind) => Ok(field.name()),
            _ => Err(Error::field_validation(
                name,
                format!("`{}` has no {kind:?} field of that name", self.entity_name()),
            )),
        }
    }
}

/// Uploads and clears a file attached to a saved entity.
///
/// The owning entity is never saved as a side effect; only the file field
/// and whatever fields the server echoes back are refreshed.
#[derive(Debug)]
pub struct FileManager<'a> {
    entity: &'a mut Entity,
    field: &'static str,
}

impl FileManager<'_> {
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// URL of the current file, if any.
    pub fn url(&self) -> Option<&str> {
        self.entity.get_str(self.field)
    }

    pub async fn upload(&mut self, mut file: FileUpload) -> Result<()> {
        file.part = self.field.to_owned();
        tracing::debug!(
            entity = self.entity.entity_name(),
            field = self.field,
            file = %file.file_name,
            "uploading file"
        );

        let subpath = self.subpath();
        let body = self
            .entity
            .field_request("upload a file to", &subpath, Method::Patch, Body::Multipart(file))
            .await?;

        self.entity.refresh(body)
    }

    /// Removes the file on the server.
    pub async fn clear(&mut self) -> Result<()> {
        let subpath = self.subpath();
        let body = self
            .entity
            .field_request("clear a file of", &subpath, Method::Delete, Body::Empty)
            .await?;

        match body {
            Value::Null => {
                self.entity.refresh_field(self.field, Value::Null);
                Ok(())
            }
            body => self.entity.refresh(body),
        }
    }

    fn subpath(&self) -> String {
        format!("{}/", self.field)
    }
}

/// Asks the server for a new random password.
///
/// The password is only known right after generation; it is kept on the
/// entity, outside its record, and never sent back.
#[derive(Debug)]
pub struct PasswordManager<'a> {
    entity: &'a mut Entity,
    field: &'static str,
}

impl PasswordManager<'_> {
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The last generated password.
    pub fn value(&self) -> Option<&str> {
        self.entity.managed.get(self.field).and_then(Value::as_str)
    }

    pub async fn generate(&mut self) -> Result<String> {
        let subpath = format!("{}-reset/", self.field);
        let body = self
            .entity
            .field_request("reset the password of", &subpath, Method::Post, Body::Empty)
            .await?;

        let Some(password) = body.get("password").and_then(Value::as_str) else {
            return Err(Error::invalid_response(
                "expected a `password` in the reset response",
            ));
        };

        tracing::debug!(entity = self.entity.entity_name(), "generated new password");
        self.entity
            .managed
            .insert(self.field.to_owned(), Value::String(password.to_owned()));
        Ok(password.to_owned())
    }
}
