pub mod map;
pub mod play;
pub mod vocab;
