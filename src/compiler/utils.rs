pub mod interner;
pub mod mangle;
