pub mod card;
pub mod session;
pub mod shell;
pub mod view;
