pub mod chat_session;
pub mod upload_staging;
