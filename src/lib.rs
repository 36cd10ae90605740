pub mod arbiter;
pub mod clock;
pub mod constants;
pub mod hash;
pub mod particles;
pub mod scheduler;
pub mod settings;
pub mod technique;

pub use arbiter::*;
pub use clock::*;
pub use constants::*;
pub use hash::*;
pub use particles::*;
pub use scheduler::*;
pub use settings::*;
pub use technique::*;
