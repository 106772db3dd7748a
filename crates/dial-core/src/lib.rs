pub mod ambient;
pub mod angular;
pub mod constants;
pub mod context;
pub mod decay;
pub mod drive;
pub mod error;
pub mod feedback;
pub mod gesture;
pub mod linear;
pub mod mode;
pub mod pulse;
pub mod range;
pub mod state;
pub mod surface;
pub mod tween;

pub use ambient::*;
pub use angular::*;
pub use constants::*;
pub use context::*;
pub use decay::*;
pub use drive::*;
pub use error::*;
pub use feedback::*;
pub use gesture::*;
pub use linear::*;
pub use mode::*;
pub use pulse::*;
pub use range::*;
pub use state::*;
pub use surface::*;
pub use tween::*;
