// ============================================================================
// Order Domain - Business Logic for Order Aggregate
// ============================================================================
//
// - Value objects (OrderId, OrderStatus, PaymentMethod, ShippingAddress)
// - Events (OrderPlaced, OrderStatusChanged, OrderReturnRequested)
// - Commands (PlaceOrder, UpdateStatus, RequestReturn)
// - Errors (OrderError)
// - Aggregate (OrderAggregate)
// - Command Handler (OrderCommandHandler, owns the event log and order list)
// - Summary (subtotal, tax, total)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;
pub mod summary;

pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
pub use summary::*;
