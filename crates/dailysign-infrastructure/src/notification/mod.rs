mod bark;
mod sender_factory;
mod server_chan;

pub use bark::BarkSender;
pub use sender_factory::create_sender;
pub use server_chan::{ServerChanSender, BODY_MAX_LINES, TITLE_MAX_CHARS};
