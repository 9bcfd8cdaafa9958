//! Hand-written records in the shape generated code produces.

pub(crate) mod tag;
pub(crate) mod user;

pub(crate) use tag::Tag;
pub(crate) use user::User;
