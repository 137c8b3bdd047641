pub mod contact;
pub mod http;
pub mod resend;
