//! Subjects: the things an ability check is evaluated against.
//!
//! A check accepts a subject in one of three forms, all resolving to the same
//! policy through a single subject name:
//!
//! | Form        | Built with                                | Rule receives |
//! |-------------|-------------------------------------------|---------------|
//! | Name        | `"Book"`                                  | `None`        |
//! | Type marker | `Book::subject_type()`                    | `None`        |
//! | Instance    | `&book`                                   | `Some(&book)` |
//!
//! ## Quick Start
//!
//! ```rust
//! use ability::{Subject, SubjectRef};
//!
//! struct Book {
//!     id: u64,
//! }
//!
//! impl Subject for Book {
//!     fn subject_name() -> &'static str { "Book" }
//! }
//!
//! let book = Book { id: 1 };
//! assert_eq!(SubjectRef::from("Book").name(), "Book");
//! assert_eq!(SubjectRef::from(Book::subject_type()).name(), "Book");
//! assert_eq!(SubjectRef::from(&book).name(), "Book");
//! assert!(SubjectRef::from(&book).instance().is_some());
//! ```

use std::{
    any::{Any, TypeId},
    borrow::Cow,
    fmt,
};

/// A trait for types that policies are registered for.
///
/// Implementors report the canonical subject name their policy is looked up
/// by. With the `derive` feature, `#[derive(Subject)]` implements it using
/// the type's identifier (override with `#[subject(name = "...")]`).
pub trait Subject: Sized + 'static {
    /// Returns the subject name for this type (e.g., "Book", "Post").
    fn subject_name() -> &'static str;

    /// Returns the type marker for this subject.
    fn subject_type() -> SubjectType {
        SubjectType::of::<Self>()
    }

    /// Borrows this value as an instance subject.
    fn as_subject(&self) -> SubjectRef<'_> {
        SubjectRef::from_instance(self)
    }
}

/// An explicit marker for a subject type.
///
/// Carries the subject name plus the Rust type identity; the type itself is
/// never instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubjectType {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
}

impl SubjectType {
    /// Creates the marker for `T`.
    pub fn of<T: Subject>() -> Self {
        Self {
            name: T::subject_name(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the subject name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the Rust type identity of the subject type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the Rust type name, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if this marker was created for `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A borrowed subject instance together with its type marker.
#[derive(Clone, Copy)]
pub struct SubjectInstance<'a> {
    ty: SubjectType,
    value: &'a (dyn Any + 'static),
}

impl<'a> SubjectInstance<'a> {
    /// Returns the type marker of the instance.
    #[inline]
    pub fn subject_type(&self) -> SubjectType {
        self.ty
    }

    /// Returns the instance as `&dyn Any`.
    #[inline]
    pub fn value(&self) -> &'a (dyn Any + 'static) {
        self.value
    }

    /// Returns the instance as `&T` if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for SubjectInstance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectInstance").field("ty", &self.ty).finish_non_exhaustive()
    }
}

/// The subject of a single check: a name, a type marker, or an instance.
///
/// Usually built implicitly through `From`: `&str`, `String`, `&String`,
/// [`SubjectType`], and `&T` for any `T: Subject` all convert.
#[derive(Debug, Clone)]
pub enum SubjectRef<'a> {
    /// A bare subject name.
    Name(Cow<'a, str>),
    /// A type marker; only its name takes part in the check.
    Type(SubjectType),
    /// A concrete instance, passed through to the policy rule.
    Instance(SubjectInstance<'a>),
}

impl<'a> SubjectRef<'a> {
    /// Creates a name subject.
    pub fn named(name: impl Into<Cow<'a, str>>) -> Self {
        SubjectRef::Name(name.into())
    }

    /// Creates a type-marker subject for `T`.
    pub fn of<T: Subject>() -> Self {
        SubjectRef::Type(SubjectType::of::<T>())
    }

    /// Creates an instance subject.
    pub fn from_instance<T: Subject>(value: &'a T) -> Self {
        SubjectRef::Instance(SubjectInstance { ty: SubjectType::of::<T>(), value })
    }

    /// Returns the subject name this subject resolves to.
    ///
    /// Resolution is deterministic: a name is used as-is, a type marker or
    /// instance reports its type's subject name.
    pub fn name(&self) -> &str {
        match self {
            SubjectRef::Name(name) => name.as_ref(),
            SubjectRef::Type(ty) => ty.name(),
            SubjectRef::Instance(instance) => instance.ty.name(),
        }
    }

    /// Returns the instance, if this subject carries one.
    pub fn instance(&self) -> Option<SubjectInstance<'a>> {
        match self {
            SubjectRef::Instance(instance) => Some(*instance),
            SubjectRef::Name(_) | SubjectRef::Type(_) => None,
        }
    }

    /// Returns `true` if this subject carries an instance.
    #[inline]
    pub fn is_instance(&self) -> bool {
        matches!(self, SubjectRef::Instance(_))
    }
}

impl fmt::Display for SubjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a> From<&'a str> for SubjectRef<'a> {
    fn from(name: &'a str) -> Self {
        SubjectRef::Name(Cow::Borrowed(name))
    }
}

impl<'a> From<&'a String> for SubjectRef<'a> {
    fn from(name: &'a String) -> Self {
        SubjectRef::Name(Cow::Borrowed(name.as_str()))
    }
}

impl From<String> for SubjectRef<'static> {
    fn from(name: String) -> Self {
        SubjectRef::Name(Cow::Owned(name))
    }
}

impl From<SubjectType> for SubjectRef<'_> {
    fn from(ty: SubjectType) -> Self {
        SubjectRef::Type(ty)
    }
}

impl<'a, T: Subject> From<&'a T> for SubjectRef<'a> {
    fn from(value: &'a T) -> Self {
        SubjectRef::from_instance(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use test_case::test_case;

    use super::*;

    struct Book {
        id: u64,
    }

    impl Subject for Book {
        fn subject_name() -> &'static str {
            "Book"
        }
    }

    struct Magazine;

    impl Subject for Magazine {
        fn subject_name() -> &'static str {
            "Periodical"
        }
    }

    #[test_case(SubjectRef::from("Book") ; "name")]
    #[test_case(SubjectRef::from(String::from("Book")) ; "owned name")]
    #[test_case(SubjectRef::from(Book::subject_type()) ; "type marker")]
    #[test_case(SubjectRef::of::<Book>() ; "type marker via of")]
    fn test_resolves_to_book_without_instance(subject: SubjectRef<'_>) {
        assert_eq!(subject.name(), "Book");
        assert!(subject.instance().is_none());
        assert!(!subject.is_instance());
    }

    #[test]
    fn test_instance_resolves_to_type_name() {
        let book = Book { id: 7 };
        let subject = SubjectRef::from(&book);
        assert_eq!(subject.name(), "Book");
        assert!(subject.is_instance());

        let instance = subject.instance().map(|i| i.downcast_ref::<Book>().map(|b| b.id));
        assert_eq!(instance, Some(Some(7)));
    }

    #[test]
    fn test_from_instance_and_instance_accessor() {
        let book = Book { id: 3 };
        let subject = SubjectRef::from_instance(&book);

        let instance = subject.instance().unwrap();
        assert_eq!(instance.subject_type(), Book::subject_type());
        assert_eq!(instance.downcast_ref::<Book>().map(|b| b.id), Some(3));
        assert!(SubjectRef::named("Book").instance().is_none());
    }

    #[test]
    fn test_as_subject() {
        let book = Book { id: 1 };
        assert_eq!(book.as_subject().name(), "Book");
        assert!(book.as_subject().is_instance());
    }

    #[test]
    fn test_downcast_to_wrong_type() {
        let magazine = Magazine;
        let subject = SubjectRef::from(&magazine);
        let instance = subject.instance();
        assert!(instance.is_some_and(|i| i.downcast_ref::<Book>().is_none()));
    }

    #[test]
    fn test_subject_name_differs_from_type_name() {
        let ty = Magazine::subject_type();
        assert_eq!(ty.name(), "Periodical");
        assert!(ty.type_name().ends_with("Magazine"));
        assert!(ty.is::<Magazine>());
        assert!(!ty.is::<Book>());
    }

    #[test]
    fn test_borrowed_string() {
        let name = String::from("Book");
        let subject = SubjectRef::from(&name);
        assert_eq!(subject.to_string(), "Book");
    }

    #[test]
    fn test_type_marker_equality() {
        assert_eq!(Book::subject_type(), SubjectType::of::<Book>());
        assert_ne!(Book::subject_type(), Magazine::subject_type());
        assert_eq!(Book::subject_type().to_string(), "Book");
    }
}
