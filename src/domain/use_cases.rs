pub mod contact;
pub mod dispatch;
