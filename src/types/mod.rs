pub mod ids;
pub mod response;
pub mod watermark;

pub use ids::*;
pub use response::*;
pub use watermark::*;
