pub mod input;
pub mod movement;
pub mod pickups;

pub use input::*;
pub use movement::*;
pub use pickups::*;
