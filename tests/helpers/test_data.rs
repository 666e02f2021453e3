//! Test data helpers for creating request payloads
//! 
//! This module provides helper functions for creating registration, login,
//! and venue payloads with unique identities per test.

use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use uuid::Uuid;

/// Password used by every test account
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Generate an email that is unique across test runs
pub fn unique_email(prefix: &str) -> String {
    let tag = Uuid::new_v4().to_string().replace('-', "");
    format!("{}-{}@test.turfbook.example.com", prefix, &tag[..12])
}

/// Registration payload for the given role
pub fn register_payload(role: &str) -> Value {
    let name: String = Name().fake();
    let mut payload = json!({
        "name": name,
        "email": unique_email(role),
        "password": TEST_PASSWORD,
        "phone": "+7 999 123 45 67",
        "role": role,
    });
    
    if role == "partner" {
        let company: String = CompanyName().fake();
        payload["company_name"] = json!(company);
    }
    
    payload
}

/// Login payload
pub fn login_payload(email: &str, password: &str, role: &str) -> Value {
    json!({
        "email": email,
        "password": password,
        "role": role,
    })
}

/// Venue creation payload with a unique, searchable name
pub fn venue_payload(sport: &str) -> Value {
    let tag = Uuid::new_v4().to_string().replace('-', "");
    json!({
        "name": format!("Arena {}", &tag[..10]),
        "location": "North District",
        "sport": sport,
        "price_per_hour": 120000,
        "description": "Covered pitch with floodlights",
        "amenities": ["parking", "showers"],
    })
}
