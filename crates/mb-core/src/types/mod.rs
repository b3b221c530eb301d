pub mod directory;
pub mod enums;
pub mod help;
pub mod ids;
pub mod io;
pub mod maternal;
pub mod mental;
pub mod statistics;
pub mod symptom;

pub use directory::*;
pub use enums::*;
pub use help::*;
pub use ids::*;
pub use io::*;
pub use maternal::*;
pub use mental::*;
pub use statistics::*;
pub use symptom::*;
