use crate::{Error, Result, Value};

use std::fmt::Write;

/// URL template of one entity type's collection, relative to the API root.
///
/// Templates for nested resources contain `:name:` placeholders, e.g.
/// `core/groups/:id:/users/`. Placeholders are filled positionally from the
/// ancestor identity chain, outermost ancestor first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    template: String,

    /// The list endpoint answers with `{count, next, previous, results}`.
    paginated: bool,

    /// Create and update are refused locally.
    read_only: bool,
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

impl Route {
    pub fn new(template: impl Into<String>) -> Route {
        Route {
            template: template.into(),
            paginated: false,
            read_only: false,
        }
    }

    pub fn paginated(mut self) -> Route {
        self.paginated = true;
        self
    }

    pub fn read_only(mut self) -> Route {
        self.read_only = true;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Number of ancestor identities the template needs.
    pub fn depth(&self) -> usize {
        self.segments()
            .filter(|segment| matches!(segment, Segment::Placeholder(_)))
            .count()
    }

    /// Returns `true` when the template addresses a child resource.
    pub fn is_nested(&self) -> bool {
        self.depth() > 0
    }

    /// Resolves the collection path with the given ancestor identities.
    pub fn resolve(&self, ancestors: &[Value]) -> Result<String> {
        if self.template.matches(':').count() % 2 != 0 {
            return Err(Error::invalid_route(
                &self.template,
                "unbalanced `:` in placeholder",
            ));
        }

        let depth = self.depth();
        if ancestors.len() != depth {
            return Err(Error::invalid_route(
                &self.template,
                format!(
                    "expected {depth} ancestor identities, got {}",
                    ancestors.len()
                ),
            ));
        }

        let mut path = String::with_capacity(self.template.len());
        let mut ancestors = ancestors.iter();

        for segment in self.segments() {
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Placeholder(name) => {
                    // The count check above guarantees one identity per placeholder
                    let Some(value) = ancestors.next() else {
                        break;
                    };
                    push_identity(&mut path, value).map_err(|_| {
                        Error::invalid_route(
                            &self.template,
                            format!("`{name}` cannot be filled with {value}"),
                        )
                    })?;
                }
            }
        }

        Ok(path)
    }

    /// Resolves the path of one entity within the collection.
    pub fn entity_path(&self, ancestors: &[Value], id: impl std::fmt::Display) -> Result<String> {
        let mut path = self.resolve(ancestors)?;
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }

        let segment = id.to_string();
        if !is_path_safe(&segment) {
            return Err(Error::invalid_route(
                &self.template,
                format!("`{segment}` is not a valid entity identity"),
            ));
        }

        path.push_str(&segment);
        path.push('/');
        Ok(path)
    }

    fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.template.split(':').enumerate().filter_map(|(i, part)| {
            if i % 2 == 0 {
                (!part.is_empty()).then_some(Segment::Literal(part))
            } else {
                Some(Segment::Placeholder(part))
            }
        })
    }
}

fn push_identity(path: &mut String, value: &Value) -> core::result::Result<(), ()> {
    match value {
        Value::Number(number) => {
            let _ = write!(path, "{number}");
            Ok(())
        }
        Value::String(alias) if is_path_safe(alias) => {
            path.push_str(alias);
            Ok(())
        }
        _ => Err(()),
    }
}

/// A single path segment that cannot escape or reshape the resolved path.
fn is_path_safe(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '?', '#'])
}
