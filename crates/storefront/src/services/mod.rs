//! External service clients: payment gateway and transactional email.

pub mod email;
pub mod stripe;
