//! Policy registry that creates an [`Ability`] per user.

use std::{collections::HashMap, fmt, sync::Arc};

use super::{Ability, AbilityFactoryBuilder, PolicyMap};
use crate::{Error, Result, config::FactoryConfig, policy::Policy};

/// A type-erased policy constructor.
pub(crate) type Constructor<U> = Arc<dyn Fn() -> Result<Policy<U>> + Send + Sync>;

/// Where a registered policy comes from on each `create`.
pub(crate) enum PolicySource<U> {
    /// A constructor run once per created ability.
    Construct(Constructor<U>),
    /// One instance reused by every created ability.
    Shared(Arc<Policy<U>>),
}

impl<U> PolicySource<U> {
    pub(crate) fn instantiate(&self) -> Result<Arc<Policy<U>>> {
        match self {
            PolicySource::Construct(ctor) => ctor().map(Arc::new),
            PolicySource::Shared(policy) => Ok(Arc::clone(policy)),
        }
    }
}

impl<U> Clone for PolicySource<U> {
    fn clone(&self) -> Self {
        match self {
            PolicySource::Construct(ctor) => PolicySource::Construct(Arc::clone(ctor)),
            PolicySource::Shared(policy) => PolicySource::Shared(Arc::clone(policy)),
        }
    }
}

/// Registry mapping subject names to policy constructors.
///
/// The factory is built once at startup and then used to create an
/// [`Ability`] per user, typically per request. Each `create` runs every
/// registered constructor, so abilities never share policy state unless a
/// policy was registered with
/// [`share`](AbilityFactoryBuilder::share).
///
/// `AbilityFactory` is cheap to clone and `Send + Sync`; keep one in your
/// application state.
///
/// ## Example
///
/// ```rust
/// use ability::{AbilityFactory, Policy, Subject};
///
/// struct User { id: u64 }
/// struct Post { author_id: u64 }
///
/// impl Subject for Post {
///     fn subject_name() -> &'static str { "Post" }
/// }
///
/// fn post_policy() -> Policy<User> {
///     Policy::<User>::builder::<Post>()
///         .action("view", |_, _| true)
///         .instance_action("update", |user, post| user.id == post.author_id)
///         .build()
/// }
///
/// let factory = AbilityFactory::builder()
///     .register_subject::<Post>(post_policy)
///     .build()?;
///
/// let ability = factory.create(User { id: 7 })?;
/// assert!(ability.can("update", &Post { author_id: 7 })?);
/// # Ok::<(), ability::Error>(())
/// ```
pub struct AbilityFactory<U> {
    sources: HashMap<String, PolicySource<U>>,
    config: FactoryConfig,
}

impl<U: 'static> AbilityFactory<U> {
    /// Starts building a factory.
    pub fn builder() -> AbilityFactoryBuilder<U> {
        AbilityFactoryBuilder::new()
    }

    /// Creates a factory from `(subject name, constructor)` pairs.
    ///
    /// Later pairs replace earlier ones with the same name. Use
    /// [`builder`](Self::builder) for fallible constructors, shared
    /// instances, or duplicate detection.
    pub fn new<I, N, F>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, F)>,
        N: Into<String>,
        F: Fn() -> Policy<U> + Send + Sync + 'static,
    {
        let sources = entries
            .into_iter()
            .map(|(name, ctor)| {
                let ctor: Constructor<U> = Arc::new(move || -> Result<Policy<U>> { Ok(ctor()) });
                (name.into(), PolicySource::Construct(ctor))
            })
            .collect();
        Self::from_parts(sources, FactoryConfig::default())
    }

    pub(crate) fn from_parts(sources: HashMap<String, PolicySource<U>>, config: FactoryConfig) -> Self {
        Self { sources, config }
    }
}

impl<U> AbilityFactory<U> {
    /// Creates an ability for `user` with a fresh set of policies.
    ///
    /// # Errors
    ///
    /// Returns `PolicyConstruction` if a fallible constructor fails. The
    /// constructor's error is available through `source()`.
    pub fn create(&self, user: U) -> Result<Ability<U>> {
        let policies = self
            .sources
            .iter()
            .map(|(name, source)| Ok((name.clone(), source.instantiate()?)))
            .collect::<Result<PolicyMap<U>>>()?;
        Ok(Ability::new(user, policies))
    }

    /// Alias of [`create`](Self::create).
    #[inline]
    pub fn create_for_user(&self, user: U) -> Result<Ability<U>> {
        self.create(user)
    }

    /// Checks that every listed subject is registered and its policy defines
    /// every listed action.
    ///
    /// Each listed policy is constructed once. Intended for startup, so a
    /// missing policy or action fails the deploy instead of a request.
    ///
    /// # Errors
    ///
    /// `PolicyNotFound`, `ActionNotFound`, or `PolicyConstruction`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// factory.validate(&[
    ///     ("Book", &["view", "create", "update"]),
    ///     ("Author", &["view"]),
    /// ])?;
    /// ```
    pub fn validate(&self, expected: &[(&str, &[&str])]) -> Result<()> {
        for (subject, actions) in expected {
            let policy = self
                .sources
                .get(*subject)
                .ok_or_else(|| Error::policy_not_found(*subject))?
                .instantiate()?;

            if let Some(action) = actions.iter().find(|action| !policy.has_action(action)) {
                return Err(Error::action_not_found(*action, *subject));
            }
        }
        Ok(())
    }

    /// Returns the registered subject names, sorted.
    pub fn subject_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered subjects.
    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if no subjects are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Returns `true` if a policy is registered for `subject`.
    #[inline]
    pub fn contains(&self, subject: &str) -> bool {
        self.sources.contains_key(subject)
    }

    /// Returns the configuration the factory was built with.
    #[inline]
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }
}

impl<U> Clone for AbilityFactory<U> {
    fn clone(&self) -> Self {
        Self { sources: self.sources.clone(), config: self.config.clone() }
    }
}

impl<U> fmt::Debug for AbilityFactory<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbilityFactory")
            .field("subjects", &self.subject_names())
            .field("config", &self.config)
            .finish()
    }
}
