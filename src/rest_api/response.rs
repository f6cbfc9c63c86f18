//! # Response Formatting
//!
//! Success envelopes for the REST API.

use serde::Serialize;

/// List response
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Single record response
#[derive(Debug, Clone, Serialize)]
pub struct SingleResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> SingleResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Count-only response
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub success: bool,
    pub count: usize,
}

impl CountResponse {
    pub fn new(count: usize) -> Self {
        Self {
            success: true,
            count,
        }
    }
}
