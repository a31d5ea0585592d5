pub mod callbacks;
pub mod core;
pub mod prelude;

#[cfg(any(test, feature = "unittest"))]
pub mod unittest;

#[doc(hidden)]
pub use num_format;
