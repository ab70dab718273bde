pub mod camera;
pub mod zoom;
