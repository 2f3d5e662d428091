//! Include/exclude rules over dotted field paths
//!
//! `exclude` drops a field at any depth: `hero_powers.hero` removes the
//! `hero` key from every element of `hero_powers`. `only` restricts the
//! fields emitted; `hero_powers.id` keeps `hero_powers` but only its `id`.

/// A shaping rule set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules {
    only: Option<Vec<String>>,
    exclude: Vec<String>,
}

impl Rules {
    /// Emit every field, relationships included
    pub fn all() -> Self {
        Self::default()
    }

    /// Emit exactly these fields
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: Some(fields.into_iter().map(Into::into).collect()),
            exclude: Vec::new(),
        }
    }

    /// Emit everything except these dotted paths
    pub fn exclude<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: None,
            exclude: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds exclusions to this rule set
    pub fn with_excluded<'a>(mut self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        for path in paths {
            if !self.exclude.iter().any(|p| p == path) {
                self.exclude.push(path.to_string());
            }
        }
        self
    }

    pub fn is_only(&self) -> bool {
        self.only.is_some()
    }

    /// Whether `field` is emitted at this level
    pub fn allows(&self, field: &str) -> bool {
        if self.exclude.iter().any(|p| p == field) {
            return false;
        }
        match &self.only {
            None => true,
            Some(only) => only
                .iter()
                .any(|f| f == field || strip_segment(f, field).is_some()),
        }
    }

    /// Rules that apply to the entity reached through `field`
    pub fn descend(&self, field: &str) -> Rules {
        let exclude = self
            .exclude
            .iter()
            .filter_map(|p| strip_segment(p, field))
            .map(str::to_string)
            .collect();

        let only = self.only.as_ref().and_then(|only| {
            if only.iter().any(|f| f == field) {
                return None;
            }
            let nested: Vec<String> = only
                .iter()
                .filter_map(|f| strip_segment(f, field))
                .map(str::to_string)
                .collect();
            (!nested.is_empty()).then_some(nested)
        });

        Rules { only, exclude }
    }
}

/// `strip_segment("a.b.c", "a") == Some("b.c")`
fn strip_segment<'p>(path: &'p str, field: &str) -> Option<&'p str> {
    path.strip_prefix(field)?.strip_prefix('.')
}
