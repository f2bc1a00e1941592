pub mod mailer;

pub use mailer::Mailer;
