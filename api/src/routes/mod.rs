pub mod ask_route;
pub mod health_route;
