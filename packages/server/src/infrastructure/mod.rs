//! Infrastructure layer: concrete implementations of the domain ports.

pub mod dto;
pub mod gateway;
pub mod message_pusher;
pub mod repository;
