pub mod group;
pub mod view;
