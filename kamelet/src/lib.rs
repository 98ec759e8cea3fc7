pub mod apis;
pub mod error;

// expose only v1alpha1 types
pub use apis::camel::v1alpha1::*;

#[doc = include_str!("../../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
