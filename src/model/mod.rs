//! Domain models shared by the bot, the service layer and the node client.

pub mod command;
pub mod session;
pub mod track;
pub mod voice;
