pub mod constants;
pub mod drive;
pub mod error;
pub mod lifecycle;
pub mod mesh;
pub mod spectrum;
pub mod theme;

pub use constants::*;
pub use drive::*;
pub use error::VizError;
pub use lifecycle::*;
pub use mesh::*;
pub use spectrum::*;
pub use theme::ColorTheme;
