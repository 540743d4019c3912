//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod auth_dto;
mod order_dto;

pub use auth_dto::{LoginRequestDto, LoginResponseDto, VerifyResponseDto};
pub use order_dto::{
    CustomerDto, LineItemDto, OrderDto, OrderStatsDto, PlaceOrderDto, PlacedOrderDto,
    UpdateOrderDto,
};
