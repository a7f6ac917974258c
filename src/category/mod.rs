pub mod category_dto;
pub mod category_handlers;
pub mod category_models;
pub mod category_repository;
pub mod category_service;

pub use category_models::Category;
