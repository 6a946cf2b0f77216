// Student profile storage and its API surface. The ranking pipeline treats
// profiles as read-only input; writes happen only through these handlers.

pub mod handlers;
pub mod store;
