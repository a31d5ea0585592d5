pub mod core;
pub mod prelude;
pub mod supervisor;
pub mod worker;
