pub mod apply;
pub mod authority;
pub mod collect;
pub mod descriptor;
pub mod error;
pub mod primitive;
pub mod report;
