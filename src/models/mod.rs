pub mod api;
pub mod generation;
pub mod playlist;
pub mod trip;
