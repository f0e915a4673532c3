#![allow(dead_code)]

use registrar::gateway::{Gateway, endpoints::Endpoints};
use serde_json::{Value, json};
use wiremock::{MockServer, ResponseTemplate};

pub async fn backend() -> (MockServer, Gateway) {
    let server = MockServer::start().await;
    let gateway = gateway_for(&server);
    (server, gateway)
}

pub fn gateway_for(server: &MockServer) -> Gateway {
    let endpoints = Endpoints::new(&format!("{}/api", server.uri())).unwrap();
    Gateway::new(endpoints).unwrap()
}

pub fn student(id: i64, first_name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "firstName": first_name,
        "lastName": "Doe",
        "email": format!("{}.doe@example.com", first_name.to_lowercase()),
        "phone": "9876543210",
        "dateOfBirth": "2002-05-15",
        "gender": "Male",
        "address": "123 Main St, New York, NY",
        "course": "Computer Science",
        "year": 2,
        "enrollmentDate": "2024-09-01",
        "status": status
    })
}

pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "OK",
        "data": data
    }))
}

pub fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "success": false,
        "message": message
    }))
}
