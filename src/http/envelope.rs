//! JSON envelope shared by every response.
//!
//! Successful responses look like `{"success":true,"http_code":200,"payload":...}`
//! where the body key depends on the route; failures carry a `message`.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Body<T> {
    Payload(T),
    Data(T),
    Message(String),
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub http_code: u16,
    #[serde(flatten)]
    pub body: Option<Body<T>>,
}

#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub http_code: u16,
    pub message: String,
}

fn ok<T: Serialize>(body: Option<Body<T>>) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        http_code: 200,
        body,
    })
}

pub fn payload<T: Serialize>(value: T) -> Json<Envelope<T>> {
    ok(Some(Body::Payload(value)))
}

pub fn data<T: Serialize>(value: T) -> Json<Envelope<T>> {
    ok(Some(Body::Data(value)))
}

pub fn message(text: impl Into<String>) -> Json<Envelope<()>> {
    ok(Some(Body::Message(text.into())))
}

pub fn success() -> Json<Envelope<()>> {
    ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_key_sits_beside_status_fields() {
        let Json(envelope) = payload(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "http_code": 200, "payload": [1, 2]})
        );

        let Json(envelope) = message("done");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "http_code": 200, "message": "done"})
        );
    }

    #[test]
    fn bare_success_has_no_body() {
        let Json(envelope) = success();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "http_code": 200})
        );
    }
}
