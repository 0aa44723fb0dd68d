// src/services/mod.rs
pub mod image_processor;
pub mod redis_service;

pub use image_processor::ImageProcessor;
pub use redis_service::RedisService;
