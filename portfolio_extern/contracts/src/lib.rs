pub mod contact;
pub mod resend;
