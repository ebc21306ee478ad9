use std::collections::{HashMap, HashSet};

use crate::alias::error::AliasSystemError;

/// Marker character every alias name starts with.
pub const ALIAS_MARKER: char = '@';

/// Name-to-path translation table.
///
/// Resolution is syntactic: only the leading segment of the input (up to the
/// first `/` or `\`) is substituted, and the stored target is already
/// alias-free because registration resolves it eagerly. Existence of the
/// target path is the caller's responsibility.
///
/// The registry is not synchronized; it is expected to be populated once
/// during bootstrap before concurrent use begins.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    aliases: HashMap<String, String>,
    roots: HashSet<String>,
    ignored: HashSet<String>,
}

impl AliasRegistry {
    /// Create a new empty alias registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the immutable root aliases.
    ///
    /// Root targets are stored verbatim; any later attempt to redefine a
    /// root fails with [`AliasSystemError::RootAliasOverwrite`].
    pub fn with_roots<I, N, T>(roots: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let mut registry = Self::new();
        for (name, target) in roots {
            let name = name.into();
            registry.aliases.insert(name.clone(), target.into());
            registry.roots.insert(name);
        }
        registry
    }

    /// Place a name on the ignore list. Ignored names are never resolved
    /// and pass through lookups unchanged.
    pub fn ignore(&mut self, name: &str) {
        self.ignored.insert(name.to_string());
    }

    /// Register a non-root alias.
    ///
    /// The target is resolved eagerly (one hop) in case it itself contains
    /// an alias; the exact literal result is stored. Lookup never chases
    /// further hops.
    pub fn register(&mut self, name: &str, target: &str) -> Result<(), AliasSystemError> {
        if !name.starts_with(ALIAS_MARKER) {
            return Err(AliasSystemError::InvalidAliasName {
                name: name.to_string(),
                reason: format!("alias names must start with '{}'", ALIAS_MARKER),
            });
        }
        if name.contains('/') || name.contains('\\') {
            return Err(AliasSystemError::InvalidAliasName {
                name: name.to_string(),
                reason: "alias names must not contain a path separator".to_string(),
            });
        }
        if self.roots.contains(name) {
            return Err(AliasSystemError::RootAliasOverwrite {
                name: name.to_string(),
            });
        }
        if self.ignored.contains(name) {
            return Err(AliasSystemError::ReservedAlias {
                name: name.to_string(),
            });
        }

        let resolved = self.resolve(target, true)?;
        log::debug!("Registered alias {} -> {}", name, resolved);
        self.aliases.insert(name.to_string(), resolved);
        Ok(())
    }

    /// Resolve an alias-prefixed string.
    ///
    /// Inputs without the marker character are returned unchanged; they are
    /// not aliases. Otherwise the leading segment is substituted with its
    /// registered target and the remainder is re-attached with whichever
    /// separator the input used. Unknown leading segments fail with
    /// [`AliasSystemError::UnknownAlias`] when `throw_on_missing` is set and
    /// pass through unchanged when it is not.
    pub fn resolve(&self, input: &str, throw_on_missing: bool) -> Result<String, AliasSystemError> {
        if !input.starts_with(ALIAS_MARKER) {
            return Ok(input.to_string());
        }

        let (head, rest) = split_leading_segment(input);
        if self.ignored.contains(head) {
            return Ok(input.to_string());
        }

        match self.aliases.get(head) {
            Some(target) => Ok(format!("{}{}", target, rest)),
            None if throw_on_missing => Err(AliasSystemError::UnknownAlias {
                name: head.to_string(),
            }),
            None => Ok(input.to_string()),
        }
    }

    /// Membership test on the leading segment of `name`.
    pub fn has(&self, name: &str) -> bool {
        let (head, _) = split_leading_segment(name);
        self.aliases.contains_key(head)
    }

    /// Whether `name` is one of the protected root aliases.
    pub fn is_root(&self, name: &str) -> bool {
        self.roots.contains(name)
    }

    /// Number of registered aliases, roots included.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// True when no alias is registered.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Split an input into its leading segment and the remainder starting at the
/// first path separator (`/` or `\`), whichever occurs first. The remainder
/// keeps the separator so resolution preserves it.
fn split_leading_segment(input: &str) -> (&str, &str) {
    match input.find(['/', '\\']) {
        Some(pos) => (&input[..pos], &input[pos..]),
        None => (input, ""),
    }
}
