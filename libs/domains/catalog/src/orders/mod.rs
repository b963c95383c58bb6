pub mod entity;
pub mod handlers;
pub mod item_entity;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{CreateOrder, CreateOrderItem, Order, OrderDto, OrderItem, OrderItemDto};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
