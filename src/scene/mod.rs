pub mod bounds;
pub mod node;
pub mod view;
