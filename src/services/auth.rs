// src/services/auth.rs
//
// Mocked identity: login and registration construct a plausible user object
// instead of calling a real backend. Shapes mirror the platform's patient
// and doctor profiles.

use uuid::Uuid;

use crate::message::{RegisterRequest, User, UserType};

pub fn login_user(email: &str, user_type: UserType) -> User {
    let base = User {
        id: Uuid::new_v4().to_string(),
        name: "John Doe".to_string(),
        email: email.to_string(),
        user_type,
        phone: Some("+1234567890".to_string()),
        date_of_birth: Some("1990-01-01".to_string()),
        location: Some("New York, NY".to_string()),
        specialty: None,
        experience: None,
        rating: None,
        fee: None,
        qualifications: Vec::new(),
        languages: Vec::new(),
    };

    match user_type {
        UserType::Patient => base,
        UserType::Doctor => User {
            name: "Dr. John Smith".to_string(),
            specialty: Some("Cardiology".to_string()),
            experience: Some(10),
            rating: Some(4.8),
            fee: Some(150),
            qualifications: vec!["MD".to_string(), "FACC".to_string()],
            languages: vec!["English".to_string(), "Spanish".to_string()],
            ..base
        },
    }
}

pub fn register_user(req: RegisterRequest) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        user_type: UserType::Patient,
        phone: req.phone,
        date_of_birth: req.date_of_birth,
        location: req.location,
        specialty: None,
        experience: None,
        rating: None,
        fee: None,
        qualifications: Vec::new(),
        languages: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_login_carries_practice_fields() {
        let user = login_user("doc@example.com", UserType::Doctor);
        assert_eq!(user.user_type, UserType::Doctor);
        assert_eq!(user.specialty.as_deref(), Some("Cardiology"));
        assert_eq!(user.email, "doc@example.com");

        let patient = login_user("pat@example.com", UserType::Patient);
        assert!(patient.specialty.is_none());
    }
}
