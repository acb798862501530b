pub mod portfolio_handlers;
pub mod refine_handlers;
pub mod system_handlers;

pub use portfolio_handlers::*;
pub use refine_handlers::*;
pub use system_handlers::*;
