pub mod orbit;
pub mod planet;
pub mod ship;
