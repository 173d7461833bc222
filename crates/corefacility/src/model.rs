use crate::{provider::HttpRequestProvider, Client, Entity, Provider, Route, Schema};

use std::{ops::DerefMut, sync::Arc};

/// A typed entity of the corefacility backend.
///
/// Implementors are thin wrappers around [`Entity`], usually declared with
/// [`model!`](crate::model).
pub trait Model:
    From<Entity> + Into<Entity> + DerefMut<Target = Entity> + Send + Sync + 'static
{
    /// Entity type name, used in messages, logs and cache keys.
    const NAME: &'static str;

    fn schema() -> Schema;

    fn route() -> Route;

    /// The provider persisting this type. Defaults to plain REST requests on
    /// [`route`](Self::route).
    fn provider(client: &Client) -> Arc<dyn Provider> {
        Arc::new(HttpRequestProvider::new(
            Arc::clone(client.transport()),
            Self::route(),
        ))
    }
}

/// Declares a typed wrapper around [`Entity`](crate::Entity).
///
/// ```ignore
/// corefacility::model! {
///     /// A laboratory instrument.
///     pub struct Device;
/// }
/// ```
#[macro_export]
macro_rules! model {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Debug)]
        $vis struct $name($crate::Entity);

        impl ::core::convert::From<$crate::Entity> for $name {
            fn from(entity: $crate::Entity) -> $name {
                $name(entity)
            }
        }

        impl ::core::convert::From<$name> for $crate::Entity {
            fn from(model: $name) -> $crate::Entity {
                model.0
            }
        }

        impl ::core::ops::Deref for $name {
            type Target = $crate::Entity;

            fn deref(&self) -> &$crate::Entity {
                &self.0
            }
        }

        impl ::core::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $crate::Entity {
                &mut self.0
            }
        }
    };
}
