pub mod pagination;
pub mod shutdown;

pub use pagination::{paginated_link, PaginatedResult};
pub use shutdown::{listen_for_shutdown_signals, ShutdownSignal};
