//! Builder for [`AbilityFactory`].

use std::{collections::HashMap, error::Error as StdError, sync::Arc};

use super::factory::{AbilityFactory, Constructor, PolicySource};
use crate::{
    Error, Result,
    config::{DuplicatePolicy, FactoryConfig},
    policy::Policy,
    tracing_support,
    types::Subject,
};

/// Builder for creating [`AbilityFactory`] instances.
///
/// ## Registration
///
/// - `register()`: infallible constructor, run on every `create`
/// - `register_subject()`: same, named after a [`Subject`] type
/// - `try_register()`: fallible constructor (e.g. loads settings)
/// - `share()`: one instance reused by every ability
///
/// Registration order only matters for duplicate subject names, which are
/// handled according to [`FactoryConfig::duplicates`].
///
/// ## Example
///
/// ```rust,ignore
/// let factory = AbilityFactory::builder()
///     .register_subject::<Book>(book_policy)
///     .try_register("Report", || ReportPolicy::from_env())
///     .share("Comment", comment_policy())
///     .config(FactoryConfig::strict())
///     .build()?;
/// ```
#[must_use = "an AbilityFactoryBuilder does nothing until .build() is called"]
pub struct AbilityFactoryBuilder<U> {
    entries: Vec<(String, PolicySource<U>)>,
    config: FactoryConfig,
}

impl<U> AbilityFactoryBuilder<U> {
    /// Creates an empty builder with the default configuration.
    pub fn new() -> Self {
        Self { entries: Vec::new(), config: FactoryConfig::default() }
    }

    /// Sets the factory configuration.
    pub fn config(mut self, config: FactoryConfig) -> Self {
        self.config = config;
        self
    }

    fn push(mut self, name: String, source: PolicySource<U>) -> Self {
        self.entries.push((name, source));
        self
    }
}

impl<U> Default for AbilityFactoryBuilder<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: 'static> AbilityFactoryBuilder<U> {
    /// Registers a policy constructor under `name`.
    ///
    /// The constructor runs once per created ability.
    pub fn register<F>(self, name: impl Into<String>, ctor: F) -> Self
    where
        F: Fn() -> Policy<U> + Send + Sync + 'static,
    {
        let ctor: Constructor<U> = Arc::new(move || -> Result<Policy<U>> { Ok(ctor()) });
        self.push(name.into(), PolicySource::Construct(ctor))
    }

    /// Registers a policy constructor under `S::subject_name()`.
    pub fn register_subject<S: Subject>(
        self,
        ctor: impl Fn() -> Policy<U> + Send + Sync + 'static,
    ) -> Self {
        self.register(S::subject_name(), ctor)
    }

    /// Registers a fallible policy constructor under `name`.
    ///
    /// A failure surfaces from `create` (or from `build` with
    /// `validate_on_build`) as `PolicyConstruction`, with the constructor's
    /// error as its source.
    pub fn try_register<F, E>(self, name: impl Into<String>, ctor: F) -> Self
    where
        F: Fn() -> std::result::Result<Policy<U>, E> + Send + Sync + 'static,
        E: StdError + Send + Sync + 'static,
    {
        let name = name.into();
        let subject = name.clone();
        let ctor: Constructor<U> = Arc::new(move || -> Result<Policy<U>> {
            ctor().map_err(|err| Error::policy_construction(subject.as_str(), err))
        });
        self.push(name, PolicySource::Construct(ctor))
    }

    /// Registers one policy instance under `name`, reused by every ability.
    ///
    /// The policy's rules then see concurrent calls from every ability
    /// created by the factory; they must be stateless or synchronize
    /// internally.
    pub fn share(self, name: impl Into<String>, policy: impl Into<Arc<Policy<U>>>) -> Self {
        self.push(name.into(), PolicySource::Shared(policy.into()))
    }

    /// Builds the factory.
    ///
    /// # Errors
    ///
    /// - `DuplicatePolicy` if a name is registered twice under
    ///   [`DuplicatePolicy::Reject`]
    /// - `PolicyConstruction` if `validate_on_build` is set and a constructor
    ///   fails
    pub fn build(self) -> Result<AbilityFactory<U>> {
        let Self { entries, config } = self;
        let mut sources = HashMap::with_capacity(entries.len());

        for (name, source) in entries {
            if sources.contains_key(&name) {
                if !config.duplicates.replaces() {
                    return Err(Error::duplicate_policy(name));
                }
                if config.duplicates == DuplicatePolicy::Warn {
                    tracing_support::record_duplicate(&name);
                }
            }
            sources.insert(name, source);
        }

        if config.validate_on_build {
            for source in sources.values() {
                source.instantiate()?;
            }
        }

        Ok(AbilityFactory::from_parts(sources, config))
    }
}
