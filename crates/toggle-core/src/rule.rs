//! Rule contracts: matchers, mappers, and the normalized [`Rule`] record.
//!
//! A rule relates a file to a set of candidate files. It is made of:
//! - a [`Matcher`] deciding whether the rule applies to a path
//! - one or more [`Mapper`]s, each deriving one candidate path from the input path
//!
//! Both are host-supplied logic and may fail; failures surface as [`RuleError`] and are wrapped
//! with the rule name by the caller (see [`Rule::matches`] and [`Rule::candidates`]).

use crate::error::{RegistryError, RuleError, ToggleError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Predicate deciding whether a rule applies to a path.
pub trait Matcher: Send + Sync {
    /// Returns `true` if the rule applies to `path`.
    fn matches(&self, path: &Path) -> Result<bool, RuleError>;
}

/// Transformation from a path to one candidate path.
pub trait Mapper: Send + Sync {
    /// Derive a candidate from `path`.
    fn map(&self, path: &Path) -> Result<PathBuf, RuleError>;
}

impl<T: Matcher + ?Sized> Matcher for Box<T> {
    fn matches(&self, path: &Path) -> Result<bool, RuleError> {
        (**self).matches(path)
    }
}

impl<T: Mapper + ?Sized> Mapper for Box<T> {
    fn map(&self, path: &Path) -> Result<PathBuf, RuleError> {
        (**self).map(path)
    }
}

/// A [`Matcher`] backed by a fallible closure.
pub struct FnMatcher<F>(F);

impl<F> Matcher for FnMatcher<F>
where
    F: Fn(&Path) -> Result<bool, RuleError> + Send + Sync,
{
    fn matches(&self, path: &Path) -> Result<bool, RuleError> {
        (self.0)(path)
    }
}

/// A [`Mapper`] backed by a fallible closure.
pub struct FnMapper<F>(F);

impl<F> Mapper for FnMapper<F>
where
    F: Fn(&Path) -> Result<PathBuf, RuleError> + Send + Sync,
{
    fn map(&self, path: &Path) -> Result<PathBuf, RuleError> {
        (self.0)(path)
    }
}

/// Wrap an infallible predicate as a [`Matcher`].
pub fn matcher_fn<F>(f: F) -> impl Matcher
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    FnMatcher(move |path: &Path| -> Result<bool, RuleError> { Ok(f(path)) })
}

/// Wrap a fallible predicate as a [`Matcher`].
pub fn try_matcher_fn<F>(f: F) -> impl Matcher
where
    F: Fn(&Path) -> Result<bool, RuleError> + Send + Sync,
{
    FnMatcher(f)
}

/// Wrap an infallible transformation as a [`Mapper`].
pub fn mapper_fn<F>(f: F) -> impl Mapper
where
    F: Fn(&Path) -> PathBuf + Send + Sync,
{
    FnMapper(move |path: &Path| -> Result<PathBuf, RuleError> { Ok(f(path)) })
}

/// Wrap a fallible transformation as a [`Mapper`].
pub fn try_mapper_fn<F>(f: F) -> impl Mapper
where
    F: Fn(&Path) -> Result<PathBuf, RuleError> + Send + Sync,
{
    FnMapper(f)
}

/// Mappers as supplied at registration time: a single mapper or an ordered list.
///
/// [`Rule::new`] normalizes both shapes into one non-empty list.
pub enum Mappers {
    /// A single mapper.
    One(Box<dyn Mapper>),
    /// Mappers applied in declaration order.
    Many(Vec<Box<dyn Mapper>>),
}

impl Mappers {
    /// A single mapper.
    pub fn one(mapper: impl Mapper + 'static) -> Self {
        Mappers::One(Box::new(mapper))
    }

    /// An ordered list of mappers.
    pub fn many(mappers: Vec<Box<dyn Mapper>>) -> Self {
        Mappers::Many(mappers)
    }

    fn into_vec(self) -> Vec<Box<dyn Mapper>> {
        match self {
            Mappers::One(mapper) => vec![mapper],
            Mappers::Many(mappers) => mappers,
        }
    }
}

impl From<Box<dyn Mapper>> for Mappers {
    fn from(mapper: Box<dyn Mapper>) -> Self {
        Mappers::One(mapper)
    }
}

impl From<Vec<Box<dyn Mapper>>> for Mappers {
    fn from(mappers: Vec<Box<dyn Mapper>>) -> Self {
        Mappers::Many(mappers)
    }
}

impl fmt::Debug for Mappers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mappers::One(_) => f.write_str("Mappers::One"),
            Mappers::Many(v) => write!(f, "Mappers::Many({})", v.len()),
        }
    }
}

/// A named relation between a file and its candidate files.
pub struct Rule {
    name: String,
    matcher: Box<dyn Matcher>,
    mappers: Vec<Box<dyn Mapper>>,
}

impl Rule {
    /// Build a rule, normalizing `mappers` into a non-empty ordered list.
    pub fn new(
        name: impl Into<String>,
        matcher: impl Matcher + 'static,
        mappers: impl Into<Mappers>,
    ) -> Result<Self, RegistryError> {
        let name = name.into();
        let mappers = mappers.into().into_vec();
        if mappers.is_empty() {
            return Err(RegistryError::EmptyMappers(name));
        }
        Ok(Self {
            name,
            matcher: Box::new(matcher),
            mappers,
        })
    }

    /// Rule name (unique within a registry).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of mappers (always at least one).
    pub fn mapper_count(&self) -> usize {
        self.mappers.len()
    }

    /// Evaluate the matcher against `path`.
    pub fn matches(&self, path: &Path) -> Result<bool, ToggleError> {
        self.matcher
            .matches(path)
            .map_err(|source| ToggleError::Matcher {
                rule: self.name.clone(),
                source,
            })
    }

    /// Apply every mapper to `path`, in declaration order.
    ///
    /// The first failing mapper aborts the expansion.
    pub fn candidates(&self, path: &Path) -> Result<Vec<PathBuf>, ToggleError> {
        self.mappers
            .iter()
            .enumerate()
            .map(|(index, mapper)| {
                mapper.map(path).map_err(|source| ToggleError::Mapper {
                    rule: self.name.clone(),
                    index,
                    source,
                })
            })
            .collect()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("mapper_count", &self.mappers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_ext(ext: &'static str) -> impl Mapper {
        mapper_fn(move |p: &Path| p.with_extension(ext))
    }

    #[test]
    fn test_single_mapper_is_normalized_to_one_element() {
        let rule = Rule::new("c", matcher_fn(|_| true), Mappers::one(swap_ext("h"))).unwrap();
        assert_eq!(rule.mapper_count(), 1);
        assert_eq!(
            rule.candidates(Path::new("/p/a.c")).unwrap(),
            vec![PathBuf::from("/p/a.h")]
        );
    }

    #[test]
    fn test_empty_mapper_list_is_rejected() {
        let err = Rule::new("empty", matcher_fn(|_| true), Mappers::many(Vec::new())).unwrap_err();
        assert_eq!(err, RegistryError::EmptyMappers("empty".to_string()));
    }

    #[test]
    fn test_mappers_apply_in_declaration_order() {
        let mappers: Vec<Box<dyn Mapper>> = vec![
            Box::new(swap_ext("h")),
            Box::new(swap_ext("hpp")),
            Box::new(swap_ext("inl")),
        ];
        let rule = Rule::new("c", matcher_fn(|_| true), mappers).unwrap();
        assert_eq!(
            rule.candidates(Path::new("a.c")).unwrap(),
            vec![
                PathBuf::from("a.h"),
                PathBuf::from("a.hpp"),
                PathBuf::from("a.inl"),
            ]
        );
    }

    #[test]
    fn test_failures_carry_rule_name_and_mapper_index() {
        let mappers: Vec<Box<dyn Mapper>> = vec![
            Box::new(swap_ext("h")),
            Box::new(try_mapper_fn(|_| Err(RuleError::message("boom")))),
        ];
        let rule = Rule::new("broken", matcher_fn(|_| true), mappers).unwrap();
        match rule.candidates(Path::new("a.c")).unwrap_err() {
            ToggleError::Mapper { rule, index, .. } => {
                assert_eq!(rule, "broken");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let rule = Rule::new(
            "bad-matcher",
            try_matcher_fn(|_| Err(RuleError::message("nope"))),
            Mappers::one(swap_ext("h")),
        )
        .unwrap();
        let err = rule.matches(Path::new("a.c")).unwrap_err();
        assert_eq!(err.to_string(), "matcher of rule 'bad-matcher' failed: nope");
    }
}
