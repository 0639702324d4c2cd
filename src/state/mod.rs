// ============================================================================
// STATE MODULE - Shared state with Rc<RefCell>
// ============================================================================

pub mod app_state;
pub mod route;

pub use route::Route;
