use ignore::gitignore::{Gitignore, GitignoreBuilder};
use regex::Regex;
use std::path::Path;

/// Decides whether a slash-joined path is selected by a pattern.
///
/// Pattern syntax and compilation belong to the implementor; a constructed
/// matcher is always valid.
pub trait PathMatcher {
    fn is_match(&self, path: &str) -> bool;
}

impl PathMatcher for Regex {
    #[inline]
    fn is_match(&self, path: &str) -> bool {
        Regex::is_match(self, path)
    }
}

/// Adapts a plain predicate, e.g. a prefix or suffix test.
pub struct FnMatcher<F>(pub F);

impl<F> PathMatcher for FnMatcher<F>
where
    F: Fn(&str) -> bool,
{
    #[inline]
    fn is_match(&self, path: &str) -> bool {
        (self.0)(path)
    }
}

/// Glob set in gitignore syntax: `*.tmp`, `build/`, `!keep.tmp`.
///
/// Patterns without a slash match the final component anywhere. A trailing
/// `/` only matches entries the caller reports as directories, which this
/// matcher never does, so directory-only patterns select nothing.
pub struct GlobMatcher {
    matcher: Gitignore,
}

impl GlobMatcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, ignore::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Rooted at "." so that candidate paths are matched as given and
        // never stripped against a filesystem root.
        let mut builder = GitignoreBuilder::new(Path::new("."));
        for pat in patterns {
            builder.add_line(None, pat.as_ref())?;
        }

        Ok(GlobMatcher {
            matcher: builder.build()?,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matcher.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }
}

impl PathMatcher for GlobMatcher {
    #[inline]
    fn is_match(&self, path: &str) -> bool {
        self.matcher.matched(Path::new(path), false).is_ignore()
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
