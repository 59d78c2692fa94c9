mod sender;
mod value_objects;

pub use sender::{NotificationMessage, NotificationSender, SUMMARY_TITLE};
pub use value_objects::{ChannelConfig, ChannelType};
