///
/// KeyKind
///
/// Type-level marker naming an identity scheme.
/// A record picks one kind as its primary key and may expose others.
///

pub trait KeyKind: 'static {
    const LABEL: &'static str;
}

/// Surrogate key generated by the backend; unknown until insertion.
pub enum Generated {}

/// Key type chosen by the application.
pub enum Natural {}

/// Key derived from a named unique constraint.
pub enum Unique {}

impl KeyKind for Generated {
    const LABEL: &'static str = "generated";
}

impl KeyKind for Natural {
    const LABEL: &'static str = "natural";
}

impl KeyKind for Unique {
    const LABEL: &'static str = "unique";
}
