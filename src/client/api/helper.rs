use reqwest::{header::AUTHORIZATION, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{client::model::error::ApiError, model::api::ErrorDto};

/// Helper function to parse API responses with consistent error handling
pub async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16() as u64;

    if (200..300).contains(&status) {
        response.json::<T>().await.map_err(|e| ApiError {
            status: 500,
            message: format!("Failed to parse response: {}", e),
        })
    } else {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = match serde_json::from_str::<ErrorDto>(&text) {
            Ok(error_dto) => error_dto.error,
            Err(_) => text,
        };

        Err(ApiError { status, message })
    }
}

/// Create a GET request carrying the session credential
pub fn get(client: &reqwest::Client, url: &str, credential: &str) -> RequestBuilder {
    client
        .get(url)
        .header(AUTHORIZATION, format!("Bearer {}", credential))
}

/// Send a request and handle common errors
pub async fn send_request(request: RequestBuilder) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to send request: {}", e),
    })
}
